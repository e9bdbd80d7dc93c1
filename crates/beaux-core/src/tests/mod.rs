mod generate;
mod preview;
