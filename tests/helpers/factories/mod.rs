pub mod response_factory;
pub mod template_factory;

pub use response_factory::ResponseFactory;
pub use template_factory::TemplateFactory;
