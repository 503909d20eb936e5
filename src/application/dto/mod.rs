/// Data Transfer Objects for application layer
///
/// DTOs carry requests and results between the CLI adapter and the merge
/// use case, keeping the domain layer isolated.
mod merge_request;
mod merge_response;

pub use merge_request::{MergeRequest, MergeRequestBuilder};
pub use merge_response::MergeResponse;
