//! Survey data model shared by the analysis crates.
//!
//! - [`question`]: question definitions and the question type vocabulary
//! - [`survey`]: a survey and its ordered questions
//! - [`response`]: one respondent's submission
//! - [`answer`]: the dynamic shape of a stored answer and its projections

pub use self::{answer::*, question::*, response::*, survey::*};

pub mod answer;
pub mod question;
pub mod response;
pub mod survey;
