mod hf_inference_provider;

pub use hf_inference_provider::*;
