//! # TUI Components
//!
//! UI pieces for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Receive all data as struct fields and only draw:
//! - `TitleBar`: top status line
//! - `Toast`: transient notification
//! - `DetailModal`, `ProcessModal`: popups over the main layout
//!
//! ### Stateful Components
//!
//! Keep selection or scroll position across frames in a separate `*State`
//! struct owned by `TuiState`:
//! - `CategoryPane` / `CategoryPaneState`
//! - `ArticlePane` / `ArticlePaneState`
//! - `TextInput` (event-driven, owns its buffer)
//!
//! Components never read `App` directly. `ui::draw_ui` picks the fields
//! each one needs, so dependencies stay explicit.
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── title_bar.rs      (top status line)
//! ├── category_tree.rs  (sidebar tree)
//! ├── article_list.rs   (grid / list of articles)
//! ├── toast.rs          (notification)
//! ├── detail_modal.rs   (article popup)
//! ├── process_modal.rs  (URL processing popup)
//! └── text_input.rs     (search field)
//! ```

pub mod article_list;
pub mod category_tree;
pub mod detail_modal;
pub mod process_modal;
pub mod text_input;
mod title_bar;
mod toast;

pub use article_list::{ArticlePane, ArticlePaneState};
pub use category_tree::{CategoryPane, CategoryPaneState};
pub use detail_modal::DetailModal;
pub use process_modal::ProcessModal;
pub use text_input::{TextInput, TextInputEvent};
pub use title_bar::TitleBar;
pub use toast::Toast;
