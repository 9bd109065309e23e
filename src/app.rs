use crate::config::Config;
use crate::error::StoreError;
use crate::task::{Status, Task};
use crate::task_store::TaskStore;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Dashboard,
    Tasks,
    Statistics,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Dashboard, Section::Tasks, Section::Statistics];

    pub fn title(self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Tasks => "Tasks",
            Section::Statistics => "Statistics",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Section::Dashboard => 0,
            Section::Tasks => 1,
            Section::Statistics => 2,
        }
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddStep {
    Title,
    Description,
    DueDate,
}

impl AddStep {
    pub fn prompt(self) -> &'static str {
        match self {
            AddStep::Title => "Title",
            AddStep::Description => "Description (optional)",
            AddStep::DueDate => "Due date (YYYY-MM-DD)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddForm {
    pub step: AddStep,
    pub title: String,
    pub description: String,
    pub due_date: String,
}

impl AddForm {
    fn new() -> Self {
        Self {
            step: AddStep::Title,
            title: String::new(),
            description: String::new(),
            due_date: String::new(),
        }
    }

    pub fn current(&self) -> &str {
        match self.step {
            AddStep::Title => &self.title,
            AddStep::Description => &self.description,
            AddStep::DueDate => &self.due_date,
        }
    }

    fn current_mut(&mut self) -> &mut String {
        match self.step {
            AddStep::Title => &mut self.title,
            AddStep::Description => &mut self.description,
            AddStep::DueDate => &mut self.due_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Adding(AddForm),
    ConfirmDelete { id: u64, title: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Presentation state. Owns the store and turns key presses into store calls.
#[derive(Debug)]
pub struct App {
    pub store: TaskStore,
    pub theme: Theme,
    pub profile_name: String,
    pub section: Section,
    pub selected: usize,
    pub mode: Mode,
    pub notice: Option<Notice>,
    pub should_quit: bool,
}

impl App {
    pub fn new(store: TaskStore, config: &Config) -> Self {
        Self {
            store,
            theme: config.theme,
            profile_name: config.profile.name.clone(),
            section: Section::Dashboard,
            selected: 0,
            mode: Mode::Normal,
            notice: None,
            should_quit: false,
        }
    }

    /// Tasks in display order; `selected` indexes into this.
    pub fn visible_tasks(&self) -> Vec<Task> {
        self.store.list_tasks()
    }

    pub fn selected_task(&self) -> Option<Task> {
        self.visible_tasks().into_iter().nth(self.selected)
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match std::mem::replace(&mut self.mode, Mode::Normal) {
            Mode::Normal => self.handle_normal(key.code),
            Mode::Adding(form) => self.handle_adding(form, key.code),
            Mode::ConfirmDelete { id, title } => self.handle_confirm(id, title, key.code),
        }
    }

    fn handle_normal(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.section = Section::Dashboard,
            KeyCode::Char('2') => self.section = Section::Tasks,
            KeyCode::Char('3') => self.section = Section::Statistics,
            KeyCode::Tab => self.section = self.section.next(),
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('a') => {
                self.section = Section::Tasks;
                self.mode = Mode::Adding(AddForm::new());
            }
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                if self.selected + 1 < self.store.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') if self.section == Section::Tasks => {
                self.toggle_selected()
            }
            KeyCode::Char('d') if self.section == Section::Tasks => {
                if let Some(task) = self.selected_task() {
                    self.mode = Mode::ConfirmDelete { id: task.id, title: task.title };
                }
            }
            _ => {}
        }
    }

    fn handle_adding(&mut self, mut form: AddForm, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.notice = Some(Notice::info("Add cancelled"));
                return;
            }
            KeyCode::Char(c) => form.current_mut().push(c),
            KeyCode::Backspace => {
                form.current_mut().pop();
            }
            KeyCode::Enter => match form.step {
                AddStep::Title => form.step = AddStep::Description,
                AddStep::Description => form.step = AddStep::DueDate,
                AddStep::DueDate => {
                    self.submit(form);
                    return;
                }
            },
            _ => {}
        }
        self.mode = Mode::Adding(form);
    }

    fn submit(&mut self, mut form: AddForm) {
        match self.store.add_task(&form.title, &form.description, &form.due_date) {
            Ok(task) => {
                self.select_id(task.id);
                self.notice = Some(Notice::success("Task added successfully"));
            }
            Err(err) => {
                debug!(error = %err, "add form rejected");
                self.notice = Some(Notice::error(describe(&err)));
                form.step = AddStep::Title;
                self.mode = Mode::Adding(form);
            }
        }
    }

    fn handle_confirm(&mut self, id: u64, title: String, code: KeyCode) {
        if !matches!(code, KeyCode::Char('y') | KeyCode::Char('Y')) {
            self.notice = Some(Notice::info(format!("Kept \"{title}\"")));
            return;
        }
        self.notice = Some(match self.store.delete_task(id) {
            Ok(()) => Notice::info("Task deleted"),
            Err(err) => Notice::error(describe(&err)),
        });
        self.clamp_selection();
    }

    fn toggle_selected(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        self.notice = Some(match self.store.toggle_status(task.id) {
            Ok(task) if task.status == Status::Completed => {
                Notice::success("Task completed! Great job!")
            }
            Ok(_) => Notice::info("Task marked as pending"),
            Err(err) => Notice::error(describe(&err)),
        });
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        info!(theme = self.theme.name(), "theme toggled");
        let message = format!("{} mode activated", capitalize(self.theme.name()));
        self.notice = Some(Notice::info(message));
    }

    fn select_id(&mut self, id: u64) {
        if let Some(pos) = self.visible_tasks().iter().position(|t| t.id == id) {
            self.selected = pos;
        }
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.store.len().saturating_sub(1));
    }
}

fn describe(err: &StoreError) -> String {
    match err {
        StoreError::Validation(msg) => format!("Please fill in all required fields: {msg}"),
        StoreError::NotFound(_) => "Task not found".to_string(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
