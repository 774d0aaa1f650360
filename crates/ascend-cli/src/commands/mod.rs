pub mod completion;
pub mod publish;
