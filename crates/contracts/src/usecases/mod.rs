pub mod u508_refresh_top_data;
