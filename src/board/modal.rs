/// Visibility of the task creation dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    Open,
    #[default]
    Closed,
}

/// Fields entered in the creation dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalInput {
    pub title: String,
    pub description: String,
}

/// Task creation dialog: a visibility toggle and two input fields
#[derive(Debug, Clone, Default)]
pub struct CreationModal {
    state: ModalState,
    input: ModalInput,
}

impl CreationModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ModalState::Open
    }

    pub fn open(&mut self) {
        self.state = ModalState::Open;
    }

    /// Background click: hide without touching the fields
    pub fn close(&mut self) {
        self.state = ModalState::Closed;
    }

    pub fn toggle(&mut self) {
        self.state = match self.state {
            ModalState::Open => ModalState::Closed,
            ModalState::Closed => ModalState::Open,
        };
    }

    pub fn input(&self) -> &ModalInput {
        &self.input
    }

    pub fn set_title(&mut self, title: &str) {
        self.input.title = title.to_string();
    }

    pub fn set_description(&mut self, description: &str) {
        self.input.description = description.to_string();
    }

    /// Add one line to the multi-line description field
    pub fn append_description_line(&mut self, line: &str) {
        if !self.input.description.is_empty() {
            self.input.description.push('\n');
        }
        self.input.description.push_str(line);
    }

    /// Hand back the entered fields, clearing them and closing the dialog
    pub fn submit(&mut self) -> ModalInput {
        self.state = ModalState::Closed;
        std::mem::take(&mut self.input)
    }
}
