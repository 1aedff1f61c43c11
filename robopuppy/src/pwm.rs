pub mod pca9685;
