mod contract;
mod dice;
mod history;
