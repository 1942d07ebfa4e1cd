// src/levels.rs

use std::collections::BTreeMap;
use std::path::Path;

use log::warn;
use serde::Deserialize;

use crate::data::QuestionStore;

/// Tamaño de bloque al auto-generar niveles.
pub const DEFAULT_LEVEL_SIZE: usize = 5;

/// Formas aceptadas del JSON de niveles.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLevels {
    /// `{"1": ["q1","q2"], "2": [...]}`
    ByKey(BTreeMap<String, Vec<String>>),
    /// `[["q1","q2"], ["q3"]]` -> niveles 1..N por posición
    Positional(Vec<Vec<String>>),
}

/// Catálogo que resuelve número de nivel -> lista ordenada de IDs de pregunta.
///
/// - Carga la definición desde un archivo JSON.
/// - Si el archivo falta, no se puede leer o queda vacío al normalizar,
///   genera los niveles agrupando el banco completo en bloques de tamaño
///   fijo. Ese degradado es parte del contrato, nunca un error.
/// - Inmutable tras la carga.
pub struct LevelCatalog {
    levels: BTreeMap<usize, Vec<String>>,
    /// Claves no numéricas del origen. Se conservan (cuentan en
    /// `total_levels`) pero no son accesibles por número.
    extra: BTreeMap<String, Vec<String>>,
}

impl LevelCatalog {
    pub fn load(path: impl AsRef<Path>, questions: &QuestionStore) -> Self {
        Self::load_with_level_size(path, questions, DEFAULT_LEVEL_SIZE)
    }

    pub fn load_with_level_size(
        path: impl AsRef<Path>,
        questions: &QuestionStore,
        level_size: usize,
    ) -> Self {
        let path = path.as_ref();

        let raw = match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str::<RawLevels>(&text) {
                Ok(raw) => Some(raw),
                Err(e) => {
                    warn!(
                        "[LevelCatalog] error leyendo {}: {}. Se regenerarán niveles.",
                        path.display(),
                        e
                    );
                    None
                }
            },
            Err(e) => {
                warn!(
                    "[LevelCatalog] sin definición de niveles en {} ({}). Se generarán \
                     automáticamente en bloques de {}.",
                    path.display(),
                    e,
                    level_size
                );
                None
            }
        };

        let (levels, extra) = match raw.map(Self::normalize) {
            Some((levels, extra)) if !(levels.is_empty() && extra.is_empty()) => (levels, extra),
            _ => (Self::generate(questions, level_size), BTreeMap::new()),
        };

        Self { levels, extra }
    }

    /// Catálogo puramente generado, sin archivo de definición.
    pub fn from_questions(questions: &QuestionStore) -> Self {
        Self {
            levels: Self::generate(questions, DEFAULT_LEVEL_SIZE),
            extra: BTreeMap::new(),
        }
    }

    /// Número total de niveles definidos.
    pub fn total_levels(&self) -> usize {
        self.levels.len() + self.extra.len()
    }

    /// IDs de pregunta del nivel `number`; lista vacía si no existe.
    pub fn questions_for_level(&self, number: usize) -> &[String] {
        self.levels.get(&number).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Niveles con clave numérica, en orden ascendente.
    pub fn level_numbers(&self) -> Vec<usize> {
        self.levels.keys().copied().collect()
    }

    // ---------------- Internos ----------------

    /// Re-teclea las claves numéricas como enteros y aparta el resto.
    /// Los `BTreeMap` dan el orden: numérico ascendente y, tras él,
    /// lexicográfico para las claves no numéricas.
    fn normalize(raw: RawLevels) -> (BTreeMap<usize, Vec<String>>, BTreeMap<String, Vec<String>>) {
        match raw {
            RawLevels::Positional(blocks) => {
                let levels = blocks
                    .into_iter()
                    .enumerate()
                    .map(|(i, block)| (i + 1, block))
                    .collect();
                (levels, BTreeMap::new())
            }
            RawLevels::ByKey(map) => {
                let mut levels = BTreeMap::new();
                let mut extra = BTreeMap::new();
                for (k, v) in map {
                    match k.trim().parse::<usize>() {
                        Ok(n) => {
                            levels.insert(n, v);
                        }
                        Err(_) => {
                            extra.insert(k, v);
                        }
                    }
                }
                (levels, extra)
            }
        }
    }

    /// Genera niveles agrupando el banco en bloques consecutivos de
    /// `level_size` (el último puede ser más corto), numerados desde 1.
    fn generate(questions: &QuestionStore, level_size: usize) -> BTreeMap<usize, Vec<String>> {
        let size = level_size.max(1);
        let ids: Vec<String> = questions.all_ids().map(str::to_owned).collect();
        ids.chunks(size)
            .enumerate()
            .map(|(i, chunk)| (i + 1, chunk.to_vec()))
            .collect()
    }
}

#[cfg(test)]
impl LevelCatalog {
    /// Catálogo explícito para tests de sesión.
    pub(crate) fn from_levels(levels: BTreeMap<usize, Vec<String>>) -> Self {
        Self {
            levels,
            extra: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Question, QuestionKind};

    fn store_with_ids(n: usize) -> QuestionStore {
        let questions = (1..=n)
            .map(|i| Question {
                id: format!("q{i}"),
                prompt: format!("pregunta {i}"),
                kind: QuestionKind::TrueFalse { answer_bool: true },
            })
            .collect();
        QuestionStore::from_questions(questions).unwrap()
    }

    fn write_levels(dir: &tempfile::TempDir, json: &str) -> std::path::PathBuf {
        let path = dir.path().join("levels.json");
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn keyed_form_sorts_numeric_keys_ascending() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_levels(
            &dir,
            r#"{"2":["q3","q4"],"10":["q5"],"1":["q1","q2"]}"#,
        );
        let catalog = LevelCatalog::load(&path, &store_with_ids(5));

        assert_eq!(catalog.level_numbers(), vec![1, 2, 10]);
        assert_eq!(catalog.total_levels(), 3);
        assert_eq!(catalog.questions_for_level(1), ["q1", "q2"]);
        assert_eq!(catalog.questions_for_level(10), ["q5"]);
    }

    #[test]
    fn positional_form_numbers_from_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_levels(&dir, r#"[["q1","q2"],["q3"]]"#);
        let catalog = LevelCatalog::load(&path, &store_with_ids(3));

        assert_eq!(catalog.level_numbers(), vec![1, 2]);
        assert_eq!(catalog.questions_for_level(2), ["q3"]);
    }

    #[test]
    fn non_numeric_keys_are_kept_but_unreachable_by_number() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_levels(&dir, r#"{"1":["q1"],"bonus":["q2","q3"]}"#);
        let catalog = LevelCatalog::load(&path, &store_with_ids(3));

        assert_eq!(catalog.total_levels(), 2);
        assert_eq!(catalog.level_numbers(), vec![1]);
        // "bonus" no tiene número: ninguna consulta numérica lo devuelve
        assert!(catalog.questions_for_level(2).is_empty());
    }

    #[test]
    fn unknown_level_returns_empty_list() {
        let catalog = LevelCatalog::from_questions(&store_with_ids(3));
        assert!(catalog.questions_for_level(99).is_empty());
    }

    #[test]
    fn missing_file_generates_chunked_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with_ids(12);
        let catalog = LevelCatalog::load(dir.path().join("no_existe.json"), &store);

        // ceil(12/5) = 3 niveles: 5 + 5 + 2
        assert_eq!(catalog.total_levels(), 3);
        assert_eq!(catalog.level_numbers(), vec![1, 2, 3]);
        assert_eq!(catalog.questions_for_level(1).len(), 5);
        assert_eq!(catalog.questions_for_level(2).len(), 5);
        assert_eq!(catalog.questions_for_level(3).len(), 2);

        // La concatenación en orden de nivel reproduce el banco entero
        let concat: Vec<&str> = catalog
            .level_numbers()
            .into_iter()
            .flat_map(|n| catalog.questions_for_level(n))
            .map(String::as_str)
            .collect();
        let all: Vec<&str> = store.all_ids().collect();
        assert_eq!(concat, all);
    }

    #[test]
    fn malformed_file_degrades_to_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_levels(&dir, "{{{ esto no es json");
        let catalog = LevelCatalog::load(&path, &store_with_ids(7));

        assert_eq!(catalog.total_levels(), 2); // 5 + 2
    }

    #[test]
    fn empty_mapping_degrades_to_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_levels(&dir, "{}");
        let catalog = LevelCatalog::load(&path, &store_with_ids(5));

        assert_eq!(catalog.total_levels(), 1);
        assert_eq!(catalog.questions_for_level(1).len(), 5);
    }

    #[test]
    fn custom_level_size_controls_chunking() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with_ids(7);
        let catalog =
            LevelCatalog::load_with_level_size(dir.path().join("no_existe.json"), &store, 3);

        assert_eq!(catalog.total_levels(), 3); // 3 + 3 + 1
        assert_eq!(catalog.questions_for_level(3), ["q7"]);
    }
}
