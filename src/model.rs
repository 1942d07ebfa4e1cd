use serde::{Deserialize, Serialize};

/// Tipo de pregunta, sin carga útil. Se copia en cada [`AnswerAttempt`]
/// al arrancar la sesión.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Question {
    pub id: String,
    #[serde(rename = "question")]
    pub prompt: String, // Enunciado
    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// Unión etiquetada con la clave de corrección de cada tipo. Los nombres de
/// etiqueta y de campo son los del JSON del banco (`"mcq"` / `"truefalse"`).
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "type")]
pub enum QuestionKind {
    #[serde(rename = "mcq")]
    MultipleChoice {
        options: Vec<String>,
        answer_index: usize,
    },
    #[serde(rename = "truefalse")]
    TrueFalse { answer_bool: bool },
}

impl Question {
    pub fn qtype(&self) -> QuestionType {
        match self.kind {
            QuestionKind::MultipleChoice { .. } => QuestionType::MultipleChoice,
            QuestionKind::TrueFalse { .. } => QuestionType::TrueFalse,
        }
    }
}

/// Registro del intento del usuario sobre una pregunta, dentro de una sesión.
///
/// Una vez `answered` es `true` el registro queda congelado: responder de
/// nuevo la misma pregunta en la misma sesión no tiene efecto.
#[derive(Debug, Clone)]
pub struct AnswerAttempt {
    pub answered: bool,
    pub qtype: QuestionType,
    pub selected_index: Option<usize>, // índice elegido (en true/false: 0=True, 1=False)
    pub selected_tf: Option<bool>,     // solo para true/false
    pub correct: Option<bool>,
    pub feedback: String,
}

impl AnswerAttempt {
    pub fn new(qtype: QuestionType) -> Self {
        Self {
            answered: false,
            qtype,
            selected_index: None,
            selected_tf: None,
            correct: None,
            feedback: String::new(),
        }
    }

    /// Vuelve al estado sin responder (reintento de nivel).
    pub fn reset(&mut self) {
        self.answered = false;
        self.selected_index = None;
        self.selected_tf = None;
        self.correct = None;
        self.feedback.clear();
    }
}

/// Estados de una sesión de nivel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// El jugador está viendo la pregunta `index`, respondida o no.
    Active(usize),
    /// Terminal: se avanzó más allá de la última pregunta.
    Complete,
}
