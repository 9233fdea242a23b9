/// Which record, if any, the form is bound to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum EditMode {
    #[default]
    None,
    Creating,
    Editing(String),
}

/// Where an edit draft is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Presentation {
    #[default]
    Panel,
    Inline,
}

/// Form state shared by the exam and question screens.
///
/// A single mode slot means create and edit are mutually exclusive, and at most one
/// record is ever being edited regardless of where its editor is drawn.
#[derive(Debug, Clone, Default)]
pub(crate) struct FormState<D> {
    mode: EditMode,
    presentation: Presentation,
    draft: D,
}

impl<D: Default> FormState<D> {
    pub(crate) fn open_create(&mut self) {
        self.mode = EditMode::Creating;
        self.presentation = Presentation::Panel;
        self.draft = D::default();
    }

    pub(crate) fn open_edit(
        &mut self,
        id: impl Into<String>,
        draft: D,
        presentation: Presentation,
    ) {
        self.mode = EditMode::Editing(id.into());
        self.presentation = presentation;
        self.draft = draft;
    }

    /// The "Add"/"Cancel" toggle: closes an open form, otherwise opens a blank create form.
    pub(crate) fn toggle_create(&mut self) {
        if self.is_open() {
            self.close();
        } else {
            self.open_create();
        }
    }

    pub(crate) fn close(&mut self) {
        self.mode = EditMode::None;
        self.presentation = Presentation::Panel;
        self.draft = D::default();
    }

    pub(crate) fn is_open(&self) -> bool {
        self.mode != EditMode::None
    }

    pub(crate) fn mode(&self) -> &EditMode {
        &self.mode
    }

    pub(crate) fn presentation(&self) -> Presentation {
        self.presentation
    }

    pub(crate) fn editing_id(&self) -> Option<&str> {
        match &self.mode {
            EditMode::Editing(id) => Some(id),
            EditMode::None | EditMode::Creating => None,
        }
    }

    pub(crate) fn is_editing_inline(&self, id: &str) -> bool {
        self.presentation == Presentation::Inline && self.editing_id() == Some(id)
    }

    pub(crate) fn draft(&self) -> &D {
        &self.draft
    }

    pub(crate) fn draft_mut(&mut self) -> &mut D {
        &mut self.draft
    }
}
