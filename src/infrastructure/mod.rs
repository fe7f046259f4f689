pub mod csv_candles;
