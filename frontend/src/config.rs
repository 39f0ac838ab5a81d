use log::Level;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // carousel phase transitions show up in the console
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}
