pub mod completion;
pub mod continuation;
pub mod runner;
pub mod deferred;
pub mod derived;
pub mod fan_out;
pub mod flow;
pub mod series;
pub mod sync;

pub use continuation::Continuation;
pub use runner::{Engine, Flow};
pub use flow::{task, waterfall_task, Task, WaterfallTask};
