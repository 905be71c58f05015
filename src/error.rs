use failure::Fail;
use std::io;
use std::num::ParseIntError;

/// Error type for mapbench
#[derive(Fail, Debug)]
pub enum MapBenchError {
    /// IO error, including failure to spawn a worker thread
    #[fail(display = "IO error: {}", _0)]
    Io(#[cause] io::Error),
    /// Serialization error while writing the JSON report
    #[fail(display = "serde_json error: {}", _0)]
    Serde(#[cause] serde_json::Error),
    /// A configuration field is not a valid non-negative integer
    #[fail(display = "invalid configuration value: {}", _0)]
    ParseInt(#[cause] ParseIntError),
    /// The configuration file ended before all fields were read
    #[fail(display = "configuration is missing the `{}` field", _0)]
    MissingField(&'static str),
    /// A putter or getter thread panicked before finishing its workload
    #[fail(display = "{} thread panicked", _0)]
    WorkerPanicked(String),
    /// Error with a string message
    #[fail(display = "{}", _0)]
    StringError(String),
}

// 详细中文注释（补充）：
// 1. `Io` 同时覆盖文件读写与 `thread::Builder::spawn` 的失败，两者都以 `io::Error` 的形式出现。
// 2. `WorkerPanicked` 把 join 时拿到的 panic 变成普通错误，调用者可以决定是否继续下一个 map。
// 3. 配置文件缺字段或字段无法解析时分别对应 `MissingField` 与 `ParseInt`。

impl From<io::Error> for MapBenchError {
    fn from(err: io::Error) -> MapBenchError {
        MapBenchError::Io(err)
    }
}

impl From<serde_json::Error> for MapBenchError {
    fn from(err: serde_json::Error) -> MapBenchError {
        MapBenchError::Serde(err)
    }
}

impl From<ParseIntError> for MapBenchError {
    fn from(err: ParseIntError) -> MapBenchError {
        MapBenchError::ParseInt(err)
    }
}

/// Result type for mapbench
pub type Result<T> = std::result::Result<T, MapBenchError>;
