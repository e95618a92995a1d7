mod import;
mod table;
