pub mod error;
pub mod graphics;
pub mod interpreter;
pub mod script;
pub mod text;

pub use error::{Error, Result};
pub use graphics::{clear_screen, locate, render, render_block, Backend, Location, Terminal};
pub use interpreter::{interpret, interpret_file, Interpreter, Mode, Options, Summary, Underrun};
pub use script::Directive;
pub use text::Text;
