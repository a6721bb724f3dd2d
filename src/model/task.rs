use std::fmt;

use serde::{Deserialize, Serialize};

/// Task checkbox state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Open,
    Closed,
}

impl Status {
    /// The character used inside the checkbox `[ ]`
    pub fn checkbox_char(self) -> char {
        match self {
            Status::Open => ' ',
            Status::Closed => 'x',
        }
    }

    /// Parse a checkbox character into a status
    pub fn from_checkbox_char(c: char) -> Option<Status> {
        match c {
            ' ' => Some(Status::Open),
            'x' => Some(Status::Closed),
            _ => None,
        }
    }

    pub fn toggled(self) -> Status {
        match self {
            Status::Open => Status::Closed,
            Status::Closed => Status::Open,
        }
    }
}

/// Which task lines the view shows. Normal lines pass every filter.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    Open,
    Closed,
    #[default]
    All,
}

impl Filter {
    pub fn admits(self, status: Status) -> bool {
        match self {
            Filter::All => true,
            Filter::Open => status == Status::Open,
            Filter::Closed => status == Status::Closed,
        }
    }

    /// Cycle order: Open → Closed → All → Open
    pub fn next(self) -> Filter {
        match self {
            Filter::Open => Filter::Closed,
            Filter::Closed => Filter::All,
            Filter::All => Filter::Open,
        }
    }

    /// Status given to new task lines created under this filter
    pub fn new_task_status(self) -> Status {
        match self {
            Filter::Closed => Status::Closed,
            Filter::Open | Filter::All => Status::Open,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::Open => "Open",
            Filter::Closed => "Closed",
            Filter::All => "All",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The value carried by a task line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub status: Status,
    pub description: String,
}

impl Task {
    pub fn new(status: Status, description: impl Into<String>) -> Self {
        Task {
            status,
            description: description.into(),
        }
    }
}
