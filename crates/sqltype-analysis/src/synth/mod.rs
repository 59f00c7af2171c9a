//! TypeSynthesizer: query descriptions to a TypeScript declaration module.

pub mod codegen;
pub mod dispatch;
pub mod ts_emit;

pub use codegen::{synthesize, ModuleOptions, Synthesis};
pub use dispatch::{Dispatch, DispatchArm};
