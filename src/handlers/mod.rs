pub mod api_v1;
