/// Use cases module containing application business logic orchestration
mod merge_boms;

pub use merge_boms::MergeBomsUseCase;
