//! App struct: compositor state and the blocking event loop.
//!
//! [`App`] owns the ordered widget list (insertion order is z-order is
//! paint order), the window-sized back-buffer, the live input text,
//! and the script bridge. Each loop iteration blocks on the next input
//! event, fans it out to every widget, applies window-level semantics,
//! and recomposites when anything changed. The `new_headless`
//! constructor allows testing without a terminal.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use log::{debug, info, warn};

use crate::error::Result;
use crate::event::{
    BindingAction, EventSource, InputEvent, KeyBindingRegistry, MouseAction,
};
use crate::geometry::Size;
use crate::script::ScriptBridge;
use crate::selection::SelectionTracker;
use crate::surface::{Buffer, CellStyle, Driver};
use crate::widget::Widget;
use crate::widgets::Label;

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Window title shown by the terminal emulator.
    pub title: String,
    /// Fixed surface size; `None` queries the terminal.
    pub size: Option<Size>,
    /// Background color for the cleared back-buffer; `None` keeps the
    /// terminal default.
    pub background: Option<String>,
    /// Script file executed once at startup, its result shown in the
    /// result widget.
    pub script_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "evalpad".to_owned(),
            size: None,
            background: None,
            script_path: None,
        }
    }
}

impl AppConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title (builder).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set a fixed surface size (builder).
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the background color (builder).
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    /// Set the startup script path (builder).
    pub fn with_script_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.script_path = Some(path.into());
        self
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// The main application: widget compositor plus event loop.
///
/// Widgets are owned exclusively by the app; the designated input and
/// result labels are tracked by index for text pushes, never by a
/// second owning handle.
pub struct App {
    config: AppConfig,
    widgets: Vec<Box<dyn Widget>>,
    size: Size,
    back_buffer: Buffer,
    background: CellStyle,
    input_label: Option<usize>,
    result_label: Option<usize>,
    input_placeholder: String,
    input_text: String,
    result_text: String,
    bindings: KeyBindingRegistry,
    script: Box<dyn ScriptBridge>,
    tracker: Rc<RefCell<SelectionTracker>>,
    driver: Option<Driver>,
    running: bool,
    frame_requested: bool,
}

impl App {
    /// Create an app attached to the real terminal.
    ///
    /// Acquires the driver, queries the terminal size (unless the
    /// config fixes one), allocates the back-buffer, and takes over
    /// the screen. Every failure here is fatal to startup.
    pub fn new(config: AppConfig, script: Box<dyn ScriptBridge>) -> Result<Self> {
        let mut driver = Driver::new()?;
        let size = match config.size {
            Some(size) => size,
            None => {
                let (width, height) = Driver::terminal_size()?;
                Size::new(i32::from(width), i32::from(height))
            }
        };
        driver.enter(&config.title)?;
        Self::build(config, script, size, Some(driver))
    }

    /// Create a headless app for testing (no terminal driver).
    pub fn new_headless(
        width: i32,
        height: i32,
        config: AppConfig,
        script: Box<dyn ScriptBridge>,
    ) -> Result<Self> {
        Self::build(config, script, Size::new(width, height), None)
    }

    fn build(
        config: AppConfig,
        script: Box<dyn ScriptBridge>,
        size: Size,
        driver: Option<Driver>,
    ) -> Result<Self> {
        let background = CellStyle::validated(None, config.background.as_deref())?;
        let back_buffer = Buffer::new(size)?;
        Ok(Self {
            config,
            widgets: Vec::new(),
            size,
            back_buffer,
            background,
            input_label: None,
            result_label: None,
            input_placeholder: String::new(),
            input_text: String::new(),
            result_text: String::new(),
            bindings: KeyBindingRegistry::with_defaults(),
            script,
            tracker: Rc::new(RefCell::new(SelectionTracker::new())),
            driver,
            running: true,
            frame_requested: false,
        })
    }

    /// Shared handle to the selection tracker, for wiring into
    /// selectable widgets at construction.
    pub fn tracker(&self) -> Rc<RefCell<SelectionTracker>> {
        self.tracker.clone()
    }

    /// The key binding registry.
    pub fn bindings_mut(&mut self) -> &mut KeyBindingRegistry {
        &mut self.bindings
    }

    /// Append a widget to the paint order and return its index.
    pub fn add_widget(&mut self, widget: Box<dyn Widget>) -> usize {
        self.widgets.push(widget);
        self.widgets.len() - 1
    }

    /// Register `label` and designate it as the input line.
    ///
    /// The label's initial text doubles as the placeholder shown while
    /// the live input buffer is empty.
    pub fn set_input_label(&mut self, label: Label) {
        self.input_placeholder = label.text().to_owned();
        let index = self.add_widget(Box::new(label));
        self.input_label = Some(index);
    }

    /// Register `label` and designate it as the result line.
    pub fn set_result_label(&mut self, label: Label) {
        self.result_text = label.text().to_owned();
        let index = self.add_widget(Box::new(label));
        self.result_label = Some(index);
    }

    /// The live input buffer.
    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    /// The last script result.
    pub fn result_text(&self) -> &str {
        &self.result_text
    }

    /// The current surface size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The composed back-buffer, as of the last frame.
    pub fn back_buffer(&self) -> &Buffer {
        &self.back_buffer
    }

    /// Whether the app should quit.
    pub fn should_quit(&self) -> bool {
        !self.running
    }

    /// Request the app to quit.
    pub fn request_quit(&mut self) {
        self.running = false;
    }

    /// Whether the next loop iteration must recomposite.
    pub fn needs_frame(&self) -> bool {
        self.frame_requested || self.widgets.iter().any(|w| w.needs_redraw())
    }

    /// Route one input event: widgets first, window level second.
    pub fn handle_event(&mut self, event: &InputEvent) {
        // Every widget sees the event; bounds checks inside each
        // widget prevent cross-talk. There is no topmost-wins capture.
        for widget in &mut self.widgets {
            widget.handle_input(event);
        }

        match event {
            InputEvent::Resize { width, height } => self.handle_resize(*width, *height),
            InputEvent::Key(key) => match self.bindings.resolve(key) {
                Some(BindingAction::Quit) => {
                    info!("quit requested");
                    self.running = false;
                }
                Some(BindingAction::Submit) => {
                    info!("submitting input ({} chars)", self.input_text.chars().count());
                    // Synchronous boundary call: a slow script stalls
                    // the whole loop, there is no cancellation.
                    self.result_text = self.script.execute(&self.input_text);
                    self.frame_requested = true;
                }
                Some(BindingAction::Erase) => {
                    if self.input_text.pop().is_some() {
                        self.frame_requested = true;
                    }
                }
                None => {
                    if let Some(ch) = key.printable() {
                        self.input_text.push(ch);
                        self.frame_requested = true;
                    }
                }
            },
            InputEvent::Paste(text) => {
                if !text.is_empty() {
                    self.input_text.push_str(text);
                    self.frame_requested = true;
                }
            }
            InputEvent::Mouse(mouse) => {
                // Press/drag/release repaint so the live selection
                // highlight shows even without a content change.
                if !matches!(mouse.kind, MouseAction::Moved) {
                    self.frame_requested = true;
                }
            }
            InputEvent::Repaint { remaining } => {
                // Batched repaint requests: only the last one paints.
                if *remaining == 0 {
                    self.frame_requested = true;
                }
            }
            InputEvent::Other => {}
        }
    }

    fn handle_resize(&mut self, width: i32, height: i32) {
        let new = Size::new(width, height);
        if new == self.size {
            return;
        }
        match Buffer::new(new) {
            Ok(buffer) => {
                debug!("resized to {width}x{height}");
                self.size = new;
                self.back_buffer = buffer;
                self.frame_requested = true;
            }
            Err(err) => warn!("ignoring resize to {width}x{height}: {err}"),
        }
    }

    /// Compose one frame: push live text into the designated labels,
    /// clear the back-buffer, composite every widget in insertion
    /// order, and present.
    pub fn compose_frame(&mut self) -> Result<()> {
        self.frame_requested = false;

        let input = if self.input_text.is_empty() {
            self.input_placeholder.clone()
        } else {
            self.input_text.clone()
        };
        self.push_label_text(self.input_label, &input);
        let result = self.result_text.clone();
        self.push_label_text(self.result_label, &result);

        self.back_buffer.fill(&self.background);
        for widget in &mut self.widgets {
            widget.composite(&mut self.back_buffer);
        }

        if let Some(driver) = &mut self.driver {
            driver.present(&self.back_buffer)?;
        }
        Ok(())
    }

    fn push_label_text(&mut self, index: Option<usize>, text: &str) {
        let Some(index) = index else { return };
        if let Some(label) = self
            .widgets
            .get_mut(index)
            .and_then(|w| w.as_any_mut().downcast_mut::<Label>())
        {
            label.set_text(text);
        }
    }

    /// Run the blocking event loop until quit.
    ///
    /// Executes the configured startup script first, paints the
    /// initial frame, then blocks on `events`, the loop's single
    /// suspension point. The quit binding exits without a final paint.
    pub fn run(&mut self, events: &mut dyn EventSource) -> Result<()> {
        if let Some(path) = self.config.script_path.clone() {
            self.result_text = self.script.load_file(&path);
        }
        self.compose_frame()?;

        while self.running {
            let event = events.next_event()?;
            self.handle_event(&event);
            if !self.running {
                break;
            }
            if self.needs_frame() {
                self.compose_frame()?;
            }
        }

        if let Some(driver) = &mut self.driver {
            driver.leave()?;
        }
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Key, KeyEvent, Modifiers};
    use crate::geometry::Region;
    use std::path::Path;

    /// Canned script bridge: records calls, answers from a closure.
    struct StubScript;

    impl ScriptBridge for StubScript {
        fn execute(&mut self, code: &str) -> String {
            match code {
                "1+1" => "2".to_owned(),
                "boom" => "Error: boom".to_owned(),
                other => format!("ok: {other}"),
            }
        }

        fn load_file(&mut self, path: &Path) -> String {
            format!("loaded {}", path.display())
        }
    }

    fn headless() -> App {
        App::new_headless(40, 10, AppConfig::default(), Box::new(StubScript)).unwrap()
    }

    fn headless_with_labels() -> App {
        let mut app = headless();
        let tracker = app.tracker();
        let input = Label::new(
            "input",
            Region::new(1, 1, 30, 1),
            "type here...",
            "white",
            tracker.clone(),
        )
        .unwrap();
        let result = Label::new("result", Region::new(1, 3, 30, 1), "", "green", tracker).unwrap();
        app.set_input_label(input);
        app.set_result_label(result);
        app
    }

    fn key(code: Key) -> InputEvent {
        InputEvent::Key(KeyEvent::new(code, Modifiers::NONE))
    }

    fn label_text(app: &App, index: usize) -> String {
        app.widgets[index]
            .as_any()
            .downcast_ref::<Label>()
            .unwrap()
            .text()
            .to_owned()
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    #[test]
    fn headless_app_has_no_driver() {
        let app = headless();
        assert!(!app.should_quit());
        assert_eq!(app.size(), Size::new(40, 10));
    }

    #[test]
    fn bad_background_color_is_fatal() {
        let config = AppConfig::new().with_background("not-a-color");
        let err = App::new_headless(10, 5, config, Box::new(StubScript));
        assert!(err.is_err());
    }

    #[test]
    fn config_builder() {
        let config = AppConfig::new()
            .with_title("pad")
            .with_size(Size::new(20, 5))
            .with_background("black")
            .with_script_path("boot.rhai");
        assert_eq!(config.title, "pad");
        assert_eq!(config.size, Some(Size::new(20, 5)));
        assert_eq!(config.background.as_deref(), Some("black"));
        assert_eq!(config.script_path.as_deref(), Some(Path::new("boot.rhai")));
    }

    // -----------------------------------------------------------------------
    // Text entry
    // -----------------------------------------------------------------------

    #[test]
    fn printable_keys_append() {
        let mut app = headless();
        app.handle_event(&key(Key::Char('h')));
        app.handle_event(&key(Key::Char('i')));
        assert_eq!(app.input_text(), "hi");
        assert!(app.needs_frame());
    }

    #[test]
    fn backspace_removes_last_char() {
        let mut app = headless();
        app.handle_event(&key(Key::Char('a')));
        app.handle_event(&key(Key::Char('b')));
        app.handle_event(&key(Key::Backspace));
        assert_eq!(app.input_text(), "a");
    }

    #[test]
    fn backspace_on_empty_requests_no_frame() {
        let mut app = headless();
        app.compose_frame().unwrap();
        app.handle_event(&key(Key::Backspace));
        assert_eq!(app.input_text(), "");
        assert!(!app.needs_frame());
    }

    #[test]
    fn control_chords_are_not_text() {
        let mut app = headless();
        app.handle_event(&InputEvent::Key(KeyEvent::new(
            Key::Char('x'),
            Modifiers::CTRL,
        )));
        assert_eq!(app.input_text(), "");
    }

    #[test]
    fn paste_appends_whole_string() {
        let mut app = headless();
        app.handle_event(&InputEvent::Paste("1+1".to_owned()));
        assert_eq!(app.input_text(), "1+1");
        assert!(app.needs_frame());
    }

    // -----------------------------------------------------------------------
    // Submit / quit
    // -----------------------------------------------------------------------

    #[test]
    fn submit_routes_through_bridge() {
        let mut app = headless();
        for ch in "1+1".chars() {
            app.handle_event(&key(Key::Char(ch)));
        }
        app.handle_event(&key(Key::Enter));
        assert_eq!(app.result_text(), "2");
        // Input is kept after submission.
        assert_eq!(app.input_text(), "1+1");
    }

    #[test]
    fn script_error_is_displayed_as_result() {
        let mut app = headless();
        for ch in "boom".chars() {
            app.handle_event(&key(Key::Char(ch)));
        }
        app.handle_event(&key(Key::Enter));
        assert_eq!(app.result_text(), "Error: boom");
    }

    #[test]
    fn quit_binding_stops_the_app() {
        let mut app = headless();
        app.handle_event(&InputEvent::Key(KeyEvent::new(
            Key::Char('c'),
            Modifiers::CTRL,
        )));
        assert!(app.should_quit());
    }

    // -----------------------------------------------------------------------
    // Resize
    // -----------------------------------------------------------------------

    #[test]
    fn resize_reallocates_back_buffer() {
        let mut app = headless();
        app.handle_event(&InputEvent::Resize { width: 50, height: 12 });
        assert_eq!(app.size(), Size::new(50, 12));
        assert_eq!(app.back_buffer().size(), Size::new(50, 12));
        assert!(app.needs_frame());
    }

    #[test]
    fn resize_to_same_size_is_noop() {
        let mut app = headless();
        app.compose_frame().unwrap();
        app.handle_event(&InputEvent::Resize { width: 40, height: 10 });
        assert!(!app.needs_frame());
    }

    #[test]
    fn degenerate_resize_is_ignored() {
        let mut app = headless();
        app.handle_event(&InputEvent::Resize { width: 0, height: 10 });
        assert_eq!(app.size(), Size::new(40, 10));
    }

    // -----------------------------------------------------------------------
    // Repaint batching
    // -----------------------------------------------------------------------

    #[test]
    fn repaint_with_remaining_does_not_paint() {
        let mut app = headless();
        app.compose_frame().unwrap();
        app.handle_event(&InputEvent::Repaint { remaining: 3 });
        assert!(!app.needs_frame());
        app.handle_event(&InputEvent::Repaint { remaining: 0 });
        assert!(app.needs_frame());
    }

    // -----------------------------------------------------------------------
    // Frame composition
    // -----------------------------------------------------------------------

    #[test]
    fn compose_pushes_text_into_labels() {
        let mut app = headless_with_labels();
        for ch in "1+1".chars() {
            app.handle_event(&key(Key::Char(ch)));
        }
        app.handle_event(&key(Key::Enter));
        app.compose_frame().unwrap();

        assert_eq!(label_text(&app, 0), "1+1");
        assert_eq!(label_text(&app, 1), "2");
    }

    #[test]
    fn empty_input_shows_placeholder() {
        let mut app = headless_with_labels();
        app.compose_frame().unwrap();
        assert_eq!(label_text(&app, 0), "type here...");
    }

    #[test]
    fn composed_frame_contains_label_glyphs() {
        let mut app = headless_with_labels();
        app.compose_frame().unwrap();
        // Input label sits at (1, 1); its first glyph lands there.
        assert_eq!(app.back_buffer().cell(1, 1).unwrap().ch, 't');
    }

    #[test]
    fn paint_order_is_insertion_order() {
        let mut app = headless();
        let tracker = app.tracker();
        let under = Label::new("under", Region::new(0, 0, 5, 1), "uuuuu", "white", tracker.clone())
            .unwrap();
        let over =
            Label::new("over", Region::new(2, 0, 5, 1), "ooooo", "white", tracker).unwrap();
        app.add_widget(Box::new(under));
        app.add_widget(Box::new(over));
        app.compose_frame().unwrap();

        assert_eq!(app.back_buffer().cell(0, 0).unwrap().ch, 'u');
        assert_eq!(app.back_buffer().cell(1, 0).unwrap().ch, 'u');
        // The overlap belongs to the later widget.
        assert_eq!(app.back_buffer().cell(2, 0).unwrap().ch, 'o');
        assert_eq!(app.back_buffer().cell(4, 0).unwrap().ch, 'o');
    }

    // -----------------------------------------------------------------------
    // Run loop
    // -----------------------------------------------------------------------

    #[test]
    fn run_executes_script_and_quits() {
        use crate::event::ScriptedEvents;

        let mut app = headless_with_labels();
        let mut events = ScriptedEvents::new([
            key(Key::Char('1')),
            key(Key::Char('+')),
            key(Key::Char('1')),
            key(Key::Enter),
            InputEvent::Key(KeyEvent::new(Key::Char('c'), Modifiers::CTRL)),
        ]);
        app.run(&mut events).unwrap();

        assert!(app.should_quit());
        assert_eq!(app.result_text(), "2");
        assert_eq!(events.remaining(), 0);
    }

    #[test]
    fn run_loads_startup_script() {
        use crate::event::ScriptedEvents;

        let config = AppConfig::new().with_script_path("boot.rhai");
        let mut app = App::new_headless(40, 10, config, Box::new(StubScript)).unwrap();
        let mut events = ScriptedEvents::new([key(Key::Escape)]);
        app.run(&mut events).unwrap();
        assert_eq!(app.result_text(), "loaded boot.rhai");
    }
}
