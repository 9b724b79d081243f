pub mod dataset_kind;
