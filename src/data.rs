// src/data.rs

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use crate::model::{Question, QuestionKind};

/// Fallo fatal al cargar el banco de preguntas. El juego no puede arrancar
/// sin su banco, así que esto se propaga hasta la capa de arranque.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no se pudo leer el banco de preguntas {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("banco de preguntas malformado en {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("id de pregunta duplicado: {id}")]
    DuplicateId { id: String },
    #[error("pregunta {id}: una mcq necesita al menos 2 opciones")]
    TooFewOptions { id: String },
    #[error("pregunta {id}: answer_index {answer_index} fuera de rango ({options} opciones)")]
    AnswerIndexOutOfRange {
        id: String,
        answer_index: usize,
        options: usize,
    },
}

/// Banco de preguntas del juego.
///
/// - Carga todas las preguntas desde un archivo JSON y las valida una vez.
/// - Indexa por id para acceso O(1).
/// - Inmutable tras la carga; se comparte por referencia entre sesiones.
#[derive(Debug)]
pub struct QuestionStore {
    questions: Vec<Question>,
    by_id: HashMap<String, usize>, // id -> índice en `questions`
}

impl QuestionStore {
    /// Carga el banco desde `path`. Cualquier problema aquí es fatal.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let questions: Vec<Question> =
            serde_json::from_str(&text).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let store = Self::from_questions(questions)?;
        info!(
            "banco de preguntas cargado desde {}: {} preguntas",
            path.display(),
            store.len()
        );
        Ok(store)
    }

    /// Construye el banco desde preguntas ya en memoria (banco embebido,
    /// tests). Aplica la misma validación que [`QuestionStore::load`].
    pub fn from_questions(questions: Vec<Question>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(questions.len());
        for (i, q) in questions.iter().enumerate() {
            if let QuestionKind::MultipleChoice {
                options,
                answer_index,
            } = &q.kind
            {
                if options.len() < 2 {
                    return Err(CatalogError::TooFewOptions { id: q.id.clone() });
                }
                if *answer_index >= options.len() {
                    return Err(CatalogError::AnswerIndexOutOfRange {
                        id: q.id.clone(),
                        answer_index: *answer_index,
                        options: options.len(),
                    });
                }
            }
            if by_id.insert(q.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateId { id: q.id.clone() });
            }
        }
        Ok(Self { questions, by_id })
    }

    /// Devuelve la pregunta asociada a un id.
    ///
    /// # Panics
    /// Con un id desconocido (integridad de contenido rota).
    pub fn get(&self, id: &str) -> &Question {
        let idx = self
            .by_id
            .get(id)
            .unwrap_or_else(|| panic!("pregunta desconocida: {id}"));
        &self.questions[*idx]
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// IDs en orden de catálogo (orden de carga), estable durante el proceso.
    pub fn all_ids(&self) -> impl Iterator<Item = &str> {
        self.questions.iter().map(|q| q.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
