//! Post creation form state.

use postboard_types::CreatePostInput;

use crate::common::TextField;

/// Which field an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Body,
}

#[derive(Debug, Clone, Default)]
pub struct ComposeState {
    pub title: TextField,
    pub body: TextField,
    /// Message from the last failed create, shown under the button.
    pub last_error: Option<String>,
}

impl ComposeState {
    pub fn field_mut(&mut self, field: Field) -> &mut TextField {
        match field {
            Field::Title => &mut self.title,
            Field::Body => &mut self.body,
        }
    }

    /// Mutation input built from the fields exactly as typed.
    pub fn to_input(&self) -> CreatePostInput {
        CreatePostInput {
            title: self.title.text().to_string(),
            body: self.body.text().to_string(),
        }
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.body.clear();
        self.last_error = None;
    }
}
