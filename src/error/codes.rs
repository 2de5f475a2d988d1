/// Error code registry for transform-kit
///
/// Error codes are organized by category:
/// - 1000-1999: Pipeline definition errors
/// - 2000-2999: Input data errors
/// - 3000-3999: I/O errors
/// - 4000-4999: Execution errors
pub struct ErrorCode;

impl ErrorCode {
    // Pipeline definition errors (1000-1999)
    pub const PIPELINE_EMPTY: u16 = 1001;
    pub const PIPELINE_REDUCE_NOT_LAST: u16 = 1002;
    pub const PIPELINE_UNSUPPORTED_FORMAT: u16 = 1003;
    pub const PIPELINE_INVALID_TOML: u16 = 1004;
    pub const PIPELINE_INVALID_JSON: u16 = 1005;

    // Input data errors (2000-2999)
    pub const INPUT_INVALID_JSON: u16 = 2001;

    // I/O errors (3000-3999)
    pub const IO_READ: u16 = 3001;

    // Execution errors (4000-4999)
    pub const EXEC_STEP_FAILED: u16 = 4001;
    pub const EXEC_REDUCE_ON_MAPPING: u16 = 4002;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        1001 => "Pipeline has no steps",
        1002 => "Reduce step is not the last step",
        1003 => "Pipeline file extension is not .toml or .json",
        1004 => "Invalid TOML syntax in pipeline",
        1005 => "Invalid JSON syntax in pipeline",

        2001 => "Input data is not a JSON array or object",

        3001 => "Failed to read a file",

        4001 => "A pipeline step rejected an element",
        4002 => "Reduce applied to a mapping",

        _ => "Unknown error code",
    }
}
