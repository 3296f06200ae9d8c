//! Parses a raw HTTP request head from stdin and reports what the typed
//! header helpers make of it.
//!
//! ```text
//! printf 'GET / HTTP/1.1\r\nAuthorization: Basic dXNlcjpwYXNz\r\nAccept: text/*\r\n\r\n' \
//!     | RUST_LOG=http_message=trace cargo run --example negotiate
//! ```

use std::io::Read;

use http_message::header::{Accept, AuthorizationCredential, ContentEncoding};
use http_message::http::Request;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut raw = Vec::new();
    std::io::stdin().read_to_end(&mut raw)?;
    let (request, _) = Request::parse(&raw)?;

    match request.authorization() {
        Some(credential) => {
            let scheme = credential.scheme();
            let summary = match credential {
                AuthorizationCredential::Basic(basic) => format!("user {}", basic.username()),
                AuthorizationCredential::Digest(digest) => {
                    format!("user {} in realm {}", digest.username(), digest.realm())
                }
                AuthorizationCredential::Aws(aws) => format!("signed {}", aws.signed_headers()),
                AuthorizationCredential::ApiKey(_) | AuthorizationCredential::Bearer(_) => {
                    String::from("opaque token")
                }
            };
            println!("authorization: {scheme} ({summary})");
        }
        None => println!("authorization: none (respond 401)"),
    }

    let supported = [
        Accept::ApplicationJson,
        Accept::TextHtml,
        Accept::TextPlain,
        Accept::ApplicationXml,
    ];
    match request.preferred(&supported) {
        Some(accept) => println!("content type: {accept}"),
        None => println!("content type: none acceptable (respond 406)"),
    }

    let codings: Vec<_> = ContentEncoding::ALL
        .into_iter()
        .filter(|encoding| request.accepts_encoding(*encoding))
        .map(ContentEncoding::as_str)
        .collect();
    println!("acceptable codings: {}", codings.join(", "));

    Ok(())
}
