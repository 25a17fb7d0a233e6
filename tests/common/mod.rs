pub mod synthetic_gel;
