pub mod global_model_examples;
