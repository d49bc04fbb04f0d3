#![cfg(test)]
mod access;
mod ingestion;
mod utils;
