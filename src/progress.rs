// src/progress.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{error, warn};
use serde::{Deserialize, Serialize};

/// Máximo de estrellas por nivel.
pub const MAX_STARS: u8 = 3;

/// Registro en disco: `{"unlocked": 3, "stars": {"1": 3, "2": 1}}`.
#[derive(Serialize, Deserialize, Debug, Clone)]
struct ProgressData {
    unlocked: usize,
    stars: BTreeMap<usize, u8>,
}

impl Default for ProgressData {
    fn default() -> Self {
        Self {
            unlocked: 1,
            stars: BTreeMap::new(),
        }
    }
}

/// Progreso persistente del jugador: nivel más alto desbloqueado y
/// estrellas por nivel.
///
/// Se construye una vez al arrancar el proceso y se pasa explícitamente a
/// cada sesión. Cada mutación reescribe el archivo entero; un fallo a
/// mitad de sesión pierde como mucho la sesión en curso, nunca progreso
/// ya confirmado.
pub struct ProgressStore {
    path: PathBuf,
    data: ProgressData,
}

impl ProgressStore {
    /// Carga el progreso desde `path`. Nunca falla: un archivo ausente o
    /// corrupto arranca en el estado base en vez de interrumpir el juego.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(data) => data,
                Err(e) => {
                    warn!(
                        "[ProgressStore] progreso corrupto en {}: {}. Se parte de cero.",
                        path.display(),
                        e
                    );
                    ProgressData::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => ProgressData::default(),
            Err(e) => {
                warn!(
                    "[ProgressStore] no se pudo leer {}: {}. Se parte de cero.",
                    path.display(),
                    e
                );
                ProgressData::default()
            }
        };
        Self { path, data }
    }

    /// Escribe el registro completo en disco (archivo temporal + rename,
    /// nunca queda un progreso a medias). Un fallo de escritura se registra
    /// y no se propaga.
    pub fn save(&self) {
        if let Err(e) = self.write_to_disk() {
            error!(
                "[ProgressStore] no se pudo guardar {}: {}",
                self.path.display(),
                e
            );
        }
    }

    fn write_to_disk(&self) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&self.data).map_err(std::io::Error::other)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)
    }

    /// Último nivel desbloqueado (1 por defecto).
    pub fn unlocked(&self) -> usize {
        self.data.unlocked
    }

    /// Desbloquea el nivel siguiente al que acaba de completarse.
    /// Monótono: solo escribe si el valor realmente sube.
    pub fn unlock_next(&mut self, level: usize) {
        if self.data.unlocked < level + 1 {
            self.data.unlocked = level + 1;
            self.save();
        }
    }

    /// Registra las estrellas de un nivel, recortadas a `0..=3`. Siempre
    /// escribe. La regla de no-regresión frente al mejor resultado previo
    /// es del llamante (la sesión pasa `max(nuevas, previas)`).
    pub fn set_stars(&mut self, level: usize, stars: u8) {
        self.data.stars.insert(level, stars.min(MAX_STARS));
        self.save();
    }

    /// Estrellas registradas para un nivel (0 si no hay registro).
    pub fn stars_for(&self, level: usize) -> u8 {
        self.data.stars.get(&level).copied().unwrap_or(0)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> ProgressStore {
        ProgressStore::load(dir.path().join("progress.json"))
    }

    #[test]
    fn missing_file_starts_at_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.unlocked(), 1);
        assert_eq!(store.stars_for(1), 0);
    }

    #[test]
    fn corrupt_file_starts_at_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        std::fs::write(&path, "][ basura").unwrap();

        let store = ProgressStore::load(&path);
        assert_eq!(store.unlocked(), 1);
        assert_eq!(store.stars_for(3), 0);
    }

    #[test]
    fn unlock_next_is_monotonic() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.unlock_next(3);
        assert_eq!(store.unlocked(), 4);

        // Repetir con el mismo nivel o con uno inferior no baja el valor
        store.unlock_next(3);
        store.unlock_next(1);
        assert_eq!(store.unlocked(), 4);
    }

    #[test]
    fn set_stars_clamps_to_three() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.set_stars(2, 7);
        assert_eq!(store.stars_for(2), 3);

        store.set_stars(2, 1);
        assert_eq!(store.stars_for(2), 1); // el store no protege el máximo previo
    }

    #[test]
    fn every_mutation_hits_the_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");

        let mut store = ProgressStore::load(&path);
        assert!(!path.exists());
        store.set_stars(1, 2);
        assert!(path.exists());
    }

    #[test]
    fn progress_survives_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");

        {
            let mut store = ProgressStore::load(&path);
            store.set_stars(1, 3);
            store.set_stars(2, 1);
            store.unlock_next(2);
        }

        let reloaded = ProgressStore::load(&path);
        assert_eq!(reloaded.unlocked(), 3);
        assert_eq!(reloaded.stars_for(1), 3);
        assert_eq!(reloaded.stars_for(2), 1);
    }

    #[test]
    fn file_format_matches_the_original_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");

        let mut store = ProgressStore::load(&path);
        store.set_stars(1, 3);
        store.unlock_next(1);

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["unlocked"], 2);
        assert_eq!(raw["stars"]["1"], 3);
    }
}
