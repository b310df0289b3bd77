//! Delete list interpreter: one accession id per line

use super::{accession, is_comment_or_blank, Interpreter};
use crate::config::SequenceLoadConfig;
use crate::error::FormatError;
use crate::input::DeleteInput;

const NAME: &str = "delete";

pub struct DeleteInterpreter {
    config: SequenceLoadConfig,
}

impl DeleteInterpreter {
    pub fn new(config: SequenceLoadConfig) -> Self {
        Self { config }
    }
}

impl Interpreter for DeleteInterpreter {
    type Output = DeleteInput;

    fn name(&self) -> &'static str {
        NAME
    }

    fn is_valid(&self, record: &str) -> bool {
        !is_comment_or_blank(record)
    }

    fn interpret(&self, record: &str) -> Result<DeleteInput, FormatError> {
        let mut tokens = record.split_whitespace();
        let (Some(acc_id), None) = (tokens.next(), tokens.next()) else {
            return Err(FormatError::new(NAME, "expected exactly one accession id", record));
        };

        Ok(DeleteInput {
            accession: accession(&self.config, acc_id, true),
        })
    }
}
