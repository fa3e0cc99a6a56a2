mod quiz_vm;

pub use quiz_vm::{QuizScreen, QuizScreenVm, SignalSurface, command_for_key};
