use hyper::{Request, Response, body::Incoming};
use std::{convert::Infallible, sync::Arc};

use crate::engine::auth::AUTH_HEADER;
use crate::frontend::context::FrontendContext;

use super::dispatcher::dispatch;

pub async fn handle_request(
    req: Request<Incoming>,
    ctx: Arc<FrontendContext>,
) -> Result<Response<String>, Infallible> {
    let (parts, _body) = req.into_parts();
    let auth = parts
        .headers
        .get(AUTH_HEADER)
        .and_then(|value| value.to_str().ok());
    Ok(dispatch(&parts.method, parts.uri.path(), auth, &ctx).await)
}
