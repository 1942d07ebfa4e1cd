use super::*;
use crate::model::QuestionKind;

impl<'a, V: SessionView> LevelSession<'a, V> {
    /// Respuesta a la pregunta de opción múltiple en curso.
    ///
    /// Si la pregunta ya estaba respondida (revisión) o la sesión terminó,
    /// no hace nada: como mucho un evento de puntuación por pregunta.
    ///
    /// # Panics
    /// Sobre una pregunta de verdadero/falso: el llamante debe consultar el
    /// tipo de la pregunta antes de elegir método.
    pub fn answer_multiple_choice(&mut self, choice_idx: usize) {
        let Some(qid) = self.current_qid().map(str::to_owned) else {
            return;
        };
        let q = self.questions.get(&qid);
        let answer_index = match &q.kind {
            QuestionKind::MultipleChoice { answer_index, .. } => *answer_index,
            QuestionKind::TrueFalse { .. } => {
                panic!("answer_multiple_choice sobre una pregunta true/false ({qid})")
            }
        };

        let st = self.attempts.get_mut(&qid).expect("intento sin registrar");
        if st.answered {
            return;
        }

        let correct = choice_idx == answer_index;
        let feedback = if correct { FEEDBACK_CORRECT } else { FEEDBACK_WRONG };

        // Congelar el intento
        st.answered = true;
        st.selected_index = Some(choice_idx);
        st.selected_tf = None;
        st.correct = Some(correct);
        st.feedback = feedback.to_owned();
        if correct {
            self.score += 1;
        }

        self.view.set_feedback(feedback);
        self.view.mark_choice(choice_idx, correct);
        if !correct {
            // Revelar la opción correcta
            self.view.mark_choice(answer_index, true);
        }
        self.view.disable_choices();
        self.view.set_next_enabled(true);
    }

    /// Respuesta a la pregunta de verdadero/falso en curso.
    ///
    /// Mismas reglas que [`Self::answer_multiple_choice`]; la selección se
    /// codifica también como índice (0=True, 1=False) para el marcado.
    ///
    /// # Panics
    /// Sobre una pregunta de opción múltiple.
    pub fn answer_true_false(&mut self, val_true: bool) {
        let Some(qid) = self.current_qid().map(str::to_owned) else {
            return;
        };
        let q = self.questions.get(&qid);
        let answer_bool = match &q.kind {
            QuestionKind::TrueFalse { answer_bool } => *answer_bool,
            QuestionKind::MultipleChoice { .. } => {
                panic!("answer_true_false sobre una pregunta mcq ({qid})")
            }
        };

        let st = self.attempts.get_mut(&qid).expect("intento sin registrar");
        if st.answered {
            return;
        }

        let correct = val_true == answer_bool;
        let feedback = if correct { FEEDBACK_CORRECT } else { FEEDBACK_WRONG };

        st.answered = true;
        st.selected_index = Some(if val_true { 0 } else { 1 });
        st.selected_tf = Some(val_true);
        st.correct = Some(correct);
        st.feedback = feedback.to_owned();
        if correct {
            self.score += 1;
        }

        self.view.set_feedback(feedback);
        self.view.mark_choice(if val_true { 0 } else { 1 }, correct);
        if !correct {
            self.view.mark_choice(if answer_bool { 0 } else { 1 }, true);
        }
        self.view.disable_choices();
        self.view.set_next_enabled(true);
    }
}
