use serde::{Deserialize, Serialize};

/// Categories used for a yes/no question that carries no explicit options.
pub const DEFAULT_YES_NO_OPTIONS: [&str; 2] = ["Yes", "No"];

/// The fixed vocabulary of question types.
///
/// Serialized names follow the stored survey documents (`"multiple-choice"`,
/// `"yesNo"`, ...).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum QuestionType {
    #[serde(rename = "text")]
    #[display("text")]
    Text,
    #[serde(rename = "multiple-choice")]
    #[display("multiple-choice")]
    MultipleChoice,
    #[serde(rename = "rating")]
    #[display("rating")]
    Rating,
    #[serde(rename = "number")]
    #[display("number")]
    Number,
    #[serde(rename = "yesNo")]
    #[display("yesNo")]
    YesNo,
    #[serde(rename = "dropdown")]
    #[display("dropdown")]
    Dropdown,
    #[serde(rename = "matrix")]
    #[display("matrix")]
    Matrix,
    #[serde(rename = "date")]
    #[display("date")]
    Date,
    #[serde(rename = "file")]
    #[display("file")]
    File,
    #[serde(rename = "ranking")]
    #[display("ranking")]
    Ranking,
}

impl QuestionType {
    pub const ALL: [Self; 10] = [
        Self::Text,
        Self::MultipleChoice,
        Self::Rating,
        Self::Number,
        Self::YesNo,
        Self::Dropdown,
        Self::Matrix,
        Self::Date,
        Self::File,
        Self::Ranking,
    ];

    /// Returns `true` for types whose answers are picked from a finite option set.
    #[must_use]
    pub fn is_choice(self) -> bool {
        matches!(self, Self::MultipleChoice | Self::YesNo | Self::Dropdown)
    }
}

/// A single survey item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// Answer options for choice, dropdown and ranking questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// Row labels of a matrix question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<String>>,
    /// Column labels of a matrix question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    /// Lower bound of a rating or number question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper bound of a rating or number question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Whether a multiple-choice question accepts several selections.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub multiple: bool,
    /// Accepted file types of a file upload question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept: Option<String>,
}

impl Question {
    /// Creates a question with no type-dependent metadata.
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>, question_type: QuestionType) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            question_type,
            options: None,
            rows: None,
            columns: None,
            min: None,
            max: None,
            multiple: false,
            accept: None,
        }
    }

    #[must_use]
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    #[must_use]
    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    /// Returns `true` if a multiple-choice question allows several selections.
    #[must_use]
    pub fn is_multi_select(&self) -> bool {
        self.question_type == QuestionType::MultipleChoice && self.multiple
    }

    /// Returns `true` if every answer is exactly one category out of a finite set.
    ///
    /// Single-choice, yes/no and dropdown questions qualify; multi-select
    /// questions do not.
    #[must_use]
    pub fn is_categorical(&self) -> bool {
        self.question_type.is_choice() && !self.is_multi_select()
    }

    /// Returns the category labels of this question.
    ///
    /// Yes/no questions without explicit options fall back to
    /// [`DEFAULT_YES_NO_OPTIONS`]. Other questions without options have no
    /// categories.
    ///
    /// # Examples
    ///
    /// ```
    /// # use canvass_model::{Question, QuestionType};
    /// let q = Question::new("q1", "Do you agree?", QuestionType::YesNo);
    /// assert_eq!(q.categories(), ["Yes", "No"]);
    /// ```
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        match (&self.options, self.question_type) {
            (Some(options), _) => options.iter().map(String::as_str).collect(),
            (None, QuestionType::YesNo) => DEFAULT_YES_NO_OPTIONS.to_vec(),
            (None, _) => vec![],
        }
    }
}
