use url::Url;

use crate::RequestId;

/// Work the engine must perform on behalf of the pure core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchSearch {
        request: RequestId,
        url: Url,
    },
    FetchSubject {
        request: RequestId,
        subject: String,
        url: Url,
    },
    FetchDetail {
        request: RequestId,
        id: String,
        url: Url,
    },
}
