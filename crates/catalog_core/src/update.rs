use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::TitleChanged(text) => {
            edit_filter(&mut state, text, |criteria, value| criteria.title = value);
            Vec::new()
        }
        Msg::AuthorChanged(text) => {
            edit_filter(&mut state, text, |criteria, value| criteria.author = value);
            Vec::new()
        }
        Msg::SubjectFilterChanged(text) => {
            edit_filter(&mut state, text, |criteria, value| criteria.subject = value);
            Vec::new()
        }
        Msg::LimitChanged(limit) => {
            if state.search().criteria().limit != limit {
                state.criteria_mut().limit = limit;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SearchSubmitted => {
            let criteria = state.search().criteria().clone();
            match state.search_mut().search(criteria) {
                Some(request) => {
                    state.mark_dirty();
                    vec![Effect::FetchSearch {
                        request: request.request,
                        url: request.url,
                    }]
                }
                None => Vec::new(),
            }
        }
        Msg::ClearClicked => {
            state.search_mut().clear();
            state.mark_dirty();
            Vec::new()
        }
        Msg::SubjectSelected(subject) => match state.subjects_mut().load(&subject) {
            Some(request) => {
                state.mark_dirty();
                vec![Effect::FetchSubject {
                    request: request.request,
                    subject: request.subject,
                    url: request.url,
                }]
            }
            None => Vec::new(),
        },
        Msg::DetailRequested(id) => match state.detail_mut().open(&id) {
            Some(request) => {
                state.mark_dirty();
                vec![Effect::FetchDetail {
                    request: request.request,
                    id: request.id,
                    url: request.url,
                }]
            }
            None => Vec::new(),
        },
        Msg::DetailClosed => {
            state.detail_mut().close();
            state.mark_dirty();
            Vec::new()
        }
        Msg::SearchResolved { request, outcome } => {
            if state.search_mut().resolve(request, outcome) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SubjectResolved { request, outcome } => {
            if state.subjects_mut().resolve(request, outcome) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::DetailResolved { request, outcome } => {
            if state.detail_mut().resolve(request, outcome) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Stores a form edit; an empty box clears the filter.
fn edit_filter(
    state: &mut AppState,
    text: String,
    apply: impl FnOnce(&mut crate::SearchCriteria, Option<String>),
) {
    let value = if text.is_empty() { None } else { Some(text) };
    apply(state.criteria_mut(), value);
    state.mark_dirty();
}
