//! Response body holding a format's finished document.
//!
//! Formats write the whole document into memory before the response is
//! built, so a body is at most one data frame. Bodies with no document (the
//! disabled-protocol refusal, or an envelope that failed to encode) carry
//! nothing and report themselves as ended.

use std::convert::Infallible;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use http_body::{Frame, SizeHint};

/// Body of every LoadedRest response.
#[derive(Debug, Clone, Default)]
pub struct LoadedRestBody {
    document: Option<Bytes>,
}

impl LoadedRestBody {
    /// A body with no document.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Length of the document still waiting to be sent.
    #[must_use]
    pub fn len(&self) -> usize {
        self.document.as_ref().map_or(0, Bytes::len)
    }

    /// Whether nothing is left to send.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<u8>> for LoadedRestBody {
    /// Wrap the output a format wrote. An empty buffer becomes an empty body.
    fn from(document: Vec<u8>) -> Self {
        Self {
            document: (!document.is_empty()).then(|| Bytes::from(document)),
        }
    }
}

impl http_body::Body for LoadedRestBody {
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        Poll::Ready(self.get_mut().document.take().map(|data| Ok(Frame::data(data))))
    }

    fn is_end_stream(&self) -> bool {
        self.document.is_none()
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint::with_exact(self.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use http_body::Body;
    use http_body_util::BodyExt;

    use super::*;

    #[tokio::test]
    async fn test_should_send_document_as_single_frame() {
        let mut body = LoadedRestBody::from(b"<response/>".to_vec());
        assert_eq!(body.size_hint().exact(), Some(11));
        assert!(!body.is_end_stream());

        let frame = body.frame().await.unwrap().unwrap();
        assert_eq!(frame.into_data().unwrap().as_ref(), b"<response/>");
        assert!(body.is_end_stream());
        assert!(body.frame().await.is_none());
    }

    #[tokio::test]
    async fn test_should_collect_json_null_document() {
        let bytes = LoadedRestBody::from(b"null".to_vec())
            .collect()
            .await
            .unwrap()
            .to_bytes();
        assert_eq!(bytes.as_ref(), b"null");
    }

    #[test]
    fn test_should_treat_blank_output_as_empty_body() {
        for body in [LoadedRestBody::empty(), LoadedRestBody::from(Vec::new())] {
            assert!(body.is_end_stream());
            assert!(body.is_empty());
            assert_eq!(body.size_hint().exact(), Some(0));
        }
    }
}
