mod helpers;
mod tables;
