#![cfg(test)]
mod sequence;
