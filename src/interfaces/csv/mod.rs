pub mod schedule_reader;
