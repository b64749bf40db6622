pub mod bid_record;
