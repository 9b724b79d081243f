pub mod top_data;
