pub mod chromedriver;
