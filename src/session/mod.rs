use std::collections::HashMap;

use crate::data::QuestionStore;
use crate::levels::LevelCatalog;
use crate::model::{AnswerAttempt, SessionState};
use crate::progress::ProgressStore;
use crate::view::{ReviewState, SessionSignal, SessionView};

// Submódulos
mod answers;
mod completion;
mod navigation;
mod resets;

/// Textos de feedback, sin adornos: los emojis y colores son cosa de la vista.
pub const FEEDBACK_CORRECT: &str = "Correct!";
pub const FEEDBACK_WRONG: &str = "Not quite.";

/// Una pasada de juego por un único nivel: secuencia las preguntas, registra
/// las respuestas, calcula el resultado y consolida el progreso al cerrar.
///
/// La sesión es de un solo uso. `retry` reinicia los intentos sobre la misma
/// instancia y pide a la orquestación reabrir el nivel; no hay estado de
/// pausa ni cancelación, una sesión abandonada simplemente se descarta.
pub struct LevelSession<'a, V: SessionView> {
    level: usize,
    qids: Vec<String>,
    total: usize,
    score: usize,
    state: SessionState,
    /// Intento por id de pregunta, propiedad exclusiva de la sesión.
    attempts: HashMap<String, AnswerAttempt>,
    catalog: &'a LevelCatalog,
    questions: &'a QuestionStore,
    progress: &'a mut ProgressStore,
    view: V,
    /// Buzón de señales de orquestación; se drena con [`Self::take_signal`].
    signal: Option<SessionSignal>,
}

impl<'a, V: SessionView> LevelSession<'a, V> {
    /// Arranca la sesión de `level` y renderiza la primera pregunta.
    ///
    /// Un nivel sin preguntas (número desconocido incluido) se cierra en el
    /// acto con puntuación cero, sin dividir por cero al calcular estrellas.
    ///
    /// # Panics
    /// Si el nivel referencia un id de pregunta que el banco no conoce
    /// (integridad de contenido rota).
    pub fn new(
        level: usize,
        catalog: &'a LevelCatalog,
        questions: &'a QuestionStore,
        progress: &'a mut ProgressStore,
        view: V,
    ) -> Self {
        let qids: Vec<String> = catalog.questions_for_level(level).to_vec();
        let total = qids.len();
        let attempts = qids
            .iter()
            .map(|qid| (qid.clone(), AnswerAttempt::new(questions.get(qid).qtype())))
            .collect();

        let mut session = Self {
            level,
            qids,
            total,
            score: 0,
            state: SessionState::Active(0),
            attempts,
            catalog,
            questions,
            progress,
            view,
            signal: None,
        };
        if total == 0 {
            session.finish_level();
        } else {
            session.render_current();
        }
        session
    }

    /// Título del nivel en curso para la barra de la vista.
    pub fn level_title(&self) -> String {
        format!("Level {}", self.level)
    }

    /// Renderiza la pregunta actual, en modo revisión si ya fue respondida,
    /// y deja el botón Next acorde.
    pub(crate) fn render_current(&mut self) {
        let SessionState::Active(index) = self.state else {
            return;
        };
        let qid = self.qids[index].clone();
        let questions = self.questions;
        let q = questions.get(&qid);

        let st = &self.attempts[&qid];
        let answered = st.answered;
        let review = if answered {
            Some(ReviewState {
                selected_index: st.selected_index,
                selected_tf: st.selected_tf,
                correct: st.correct.unwrap_or(false),
                feedback: st.feedback.clone(),
            })
        } else {
            None
        };

        self.view.render_question(q, index, self.total, review.as_ref());
        self.view.set_next_enabled(answered);
    }

    /// Id de la pregunta actual; `None` cuando la sesión ya terminó.
    fn current_qid(&self) -> Option<&str> {
        match self.state {
            SessionState::Active(index) => self.qids.get(index).map(String::as_str),
            SessionState::Complete => None,
        }
    }

    /// Entrega (y vacía) la señal pendiente hacia la orquestación.
    pub fn take_signal(&mut self) -> Option<SessionSignal> {
        self.signal.take()
    }

    // Accesores
    pub fn level(&self) -> usize {
        self.level
    }
    pub fn total(&self) -> usize {
        self.total
    }
    pub fn score(&self) -> usize {
        self.score
    }
    pub fn state(&self) -> SessionState {
        self.state
    }
    pub fn attempt(&self, qid: &str) -> Option<&AnswerAttempt> {
        self.attempts.get(qid)
    }
    pub fn progress(&self) -> &ProgressStore {
        self.progress
    }
    pub fn view(&self) -> &V {
        &self.view
    }
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
}
