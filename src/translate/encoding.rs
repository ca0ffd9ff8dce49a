//! Response body encoding normalization.
//!
//! The gateway wants textual payloads as plain text and re-encodes base64
//! payloads itself, so a base64 body is only left alone for binary types.

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::models::{BodyEncoding, InternalResponse, RouterResult};
use crate::utils::is_binary_mime_type;

/// Decodes a base64 body in place when its content type is not binary.
///
/// Does nothing unless a `content-type` header, a body and the base64 tag
/// are all present.
///
/// # Errors
///
/// Returns `RouterError::InvalidBody` if the body is not valid base64.
pub fn normalize_body_encoding(response: &mut InternalResponse) -> RouterResult<()> {
    if response.body_encoding != BodyEncoding::Base64 {
        return Ok(());
    }
    let Some(content_type) = response.header_value("content-type") else {
        return Ok(());
    };
    if is_binary_mime_type(content_type) {
        return Ok(());
    }
    let Some(body) = response.body.as_deref() else {
        return Ok(());
    };

    let decoded = STANDARD.decode(body.trim())?;
    response.body = Some(String::from_utf8_lossy(&decoded).into_owned());
    response.body_encoding = BodyEncoding::Text;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RouterError;

    fn response(content_type: &str, body: &str) -> InternalResponse {
        InternalResponse::new("200", "OK")
            .with_header("content-type", "Content-Type", content_type)
            .with_body(body, BodyEncoding::Base64)
    }

    #[test]
    fn test_decodes_text_types() {
        let mut html = response("text/html; charset=utf-8", "PGgxPkhpPC9oMT4=");
        normalize_body_encoding(&mut html).unwrap();
        assert_eq!(html.body.as_deref(), Some("<h1>Hi</h1>"));
        assert_eq!(html.body_encoding, BodyEncoding::Text);
    }

    #[test]
    fn test_leaves_binary_types() {
        let mut png = response("image/png", "iVBORw0KGgo=");
        normalize_body_encoding(&mut png).unwrap();
        assert_eq!(png.body.as_deref(), Some("iVBORw0KGgo="));
        assert_eq!(png.body_encoding, BodyEncoding::Base64);
    }

    #[test]
    fn test_requires_all_preconditions() {
        let mut no_header =
            InternalResponse::new("200", "OK").with_body("aGk=", BodyEncoding::Base64);
        normalize_body_encoding(&mut no_header).unwrap();
        assert_eq!(no_header.body.as_deref(), Some("aGk="));

        let mut text = response("text/plain", "aGk=");
        text.body_encoding = BodyEncoding::Text;
        normalize_body_encoding(&mut text).unwrap();
        assert_eq!(text.body.as_deref(), Some("aGk="));

        let mut no_body = response("text/plain", "");
        no_body.body = None;
        normalize_body_encoding(&mut no_body).unwrap();
        assert_eq!(no_body.body_encoding, BodyEncoding::Base64);
    }

    #[test]
    fn test_invalid_base64_is_an_error() {
        let mut broken = response("application/json", "not base64!");
        assert!(matches!(
            normalize_body_encoding(&mut broken),
            Err(RouterError::InvalidBody(_))
        ));
    }
}
