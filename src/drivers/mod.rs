pub mod m5core2;
