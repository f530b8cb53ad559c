mod headline;


pub use headline::headline_number;
