use crate::error::Result;
use crate::settings::{save_settings, shellexpand_path, Settings};

pub fn run(data_dir: Option<String>) -> Result<()> {
    let settings = match data_dir {
        Some(dir) => Settings {
            data_dir: shellexpand_path(&dir),
        },
        None => Settings::default(),
    };
    std::fs::create_dir_all(&settings.data_dir)?;
    save_settings(&settings)?;
    println!("Datos en {}", settings.data_dir);
    Ok(())
}
