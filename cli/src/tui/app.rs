use anyhow::Result;
use ratatui::widgets::TableState;
use taskboard_core::{
    Category, Clock, DueDateFilter, Priority, StatusFilter, SystemClock, Task, TaskBoard,
    TaskFilters, TaskRepository,
};
use tracing::warn;
use uuid::Uuid;

use crate::commands;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Adding,
    Searching,
    Assignee,
}

pub struct App<R: TaskRepository, C: Clock = SystemClock> {
    pub board: TaskBoard<C>,
    repo: R,
    pub state: TableState,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub message: Option<String>,
    pub date_format: String,
    dirty: bool,
}

impl<R: TaskRepository, C: Clock> App<R, C> {
    pub fn new(board: TaskBoard<C>, repo: R, date_format: String) -> Self {
        let mut app = App {
            board,
            repo,
            state: TableState::default(),
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            message: None,
            date_format,
            dirty: false,
        };
        app.clamp_selection();
        app
    }

    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.board.get_filtered_tasks()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        let i = self.state.selected()?;
        self.visible_tasks().get(i).copied()
    }

    fn selected_id(&self) -> Option<Uuid> {
        self.selected_task().map(|t| t.id)
    }

    pub fn next(&mut self) {
        let len = self.visible_tasks().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.visible_tasks().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    // Keeps the highlighted row inside the visible list after it changes size
    fn clamp_selection(&mut self) {
        let len = self.visible_tasks().len();
        match self.state.selected() {
            _ if len == 0 => self.state.select(None),
            Some(i) if i >= len => self.state.select(Some(len - 1)),
            None => self.state.select(Some(0)),
            Some(_) => {}
        }
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.board.toggle_task(&id);
            self.dirty = true;
            self.clamp_selection();
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.board.delete_task(&id);
            self.dirty = true;
            self.clamp_selection();
        }
    }

    pub fn cycle_status(&mut self) {
        let status = match self.board.filters().status {
            StatusFilter::All => StatusFilter::Incomplete,
            StatusFilter::Incomplete => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::All,
        };
        self.update_filters(|f| f.status = status);
    }

    pub fn cycle_priority(&mut self) {
        let next = cycle_option(self.board.filters().priority, &Priority::ALL);
        self.update_filters(|f| f.priority = next);
    }

    pub fn cycle_category(&mut self) {
        let next = cycle_option(self.board.filters().category, &Category::ALL);
        self.update_filters(|f| f.category = next);
    }

    pub fn cycle_due(&mut self) {
        let next = cycle_option(self.board.filters().due_date, &DueDateFilter::ALL);
        self.update_filters(|f| f.due_date = next);
    }

    pub fn reset_filters(&mut self) {
        self.board.reset_filters();
        self.dirty = true;
        self.clamp_selection();
    }

    // The reducer replaces filters wholesale, so partial changes merge here first
    fn update_filters(&mut self, change: impl FnOnce(&mut TaskFilters)) {
        let mut filters = self.board.filters().clone();
        change(&mut filters);
        self.board.set_filters(filters);
        self.dirty = true;
        self.clamp_selection();
    }

    pub fn enter_add_mode(&mut self) {
        self.start_input(InputMode::Adding, String::new());
    }

    pub fn enter_search_mode(&mut self) {
        let current = self.board.search_term().to_string();
        self.start_input(InputMode::Searching, current);
    }

    pub fn enter_assignee_mode(&mut self) {
        let current = self.board.filters().assigned_user.clone();
        self.start_input(InputMode::Assignee, current);
    }

    fn start_input(&mut self, mode: InputMode, initial: String) {
        self.input_mode = mode;
        self.cursor_position = initial.chars().count();
        self.input = initial;
        self.message = None;
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input.clear();
        self.cursor_position = 0;
    }

    /// Esc: drops a pending add, or clears the live criterion being typed.
    pub fn cancel_input(&mut self) {
        self.input.clear();
        self.sync_live_input();
        self.exit_input_mode();
    }

    pub fn submit_command(&mut self) {
        if self.input_mode == InputMode::Adding && !self.input.trim().is_empty() {
            let args: Vec<String> = self.input.split_whitespace().map(String::from).collect();
            match commands::add(&mut self.board, &args) {
                Ok(_) => {
                    self.dirty = true;
                    self.clamp_selection();
                }
                Err(e) => {
                    warn!(error = %e, "could not add task");
                    self.message = Some(e.to_string());
                }
            }
        }
        self.exit_input_mode();
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self.byte_index(self.cursor_position);
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
        self.sync_live_input();
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index = self.byte_index(self.cursor_position - 1);
            self.input.remove(byte_index);
            self.cursor_position -= 1;
            self.sync_live_input();
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.input.chars().take(char_pos).map(char::len_utf8).sum()
    }

    // Search and assignee criteria update as the user types
    fn sync_live_input(&mut self) {
        match self.input_mode {
            InputMode::Searching => {
                self.board.set_search_term(self.input.clone());
                self.clamp_selection();
            }
            InputMode::Assignee => {
                let user = self.input.clone();
                self.update_filters(|f| f.assigned_user = user);
            }
            InputMode::Normal | InputMode::Adding => {}
        }
    }

    pub fn save(&mut self) -> Result<()> {
        if self.dirty {
            self.repo.save(&self.board.snapshot())?;
            self.dirty = false;
        }
        Ok(())
    }
}

/// Unset, then each value in order, then unset again.
fn cycle_option<T: Copy + PartialEq>(current: Option<T>, values: &[T]) -> Option<T> {
    match current {
        None => values.first().copied(),
        Some(v) => values
            .iter()
            .position(|x| *x == v)
            .and_then(|i| values.get(i + 1).copied()),
    }
}
