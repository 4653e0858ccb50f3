pub mod model;

pub use model::{
    DeniedRequest, FailedRun, InputSummary, MapperResult, OkResult, ProfileResolution,
    ResolutionInfo, Status, StreamPreview, TrimmedResolution,
};
