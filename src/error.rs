use thiserror::Error;

#[derive(Error, Debug)]
pub enum LensError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("no sheet matches '{0}'")]
    UnknownSheet(String),

    #[error("no table number {0}; run `tables` to list them")]
    UnknownTable(usize),

    #[error("unknown view '{0}'; run `views` to list them")]
    UnknownView(String),

    #[error("unknown chart kind '{0}' (expected bar, pie or line)")]
    UnknownChart(String),

    #[error("no table selected")]
    NoTable,

    #[error("settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, LensError>;
