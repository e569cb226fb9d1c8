//! CRUD operations on posts: validate first, then make exactly one transport call.

use crate::error::Error;
use crate::transport::Transport;
use crate::types::Post;
use crate::validation::{validate_for_create, validate_for_update, PostCandidate};

/// The business-logic layer over a `Transport`.
///
/// Mutating operations validate their input fully before touching the
/// transport, so a rejected candidate never produces a request.
#[derive(Debug)]
pub struct PostsService<T> {
    transport: T,
}

impl<T: Transport> PostsService<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// All posts, as the remote returned them.
    pub fn list_posts(&self) -> Result<Vec<Post>, Error> {
        Ok(self.transport.list()?)
    }

    /// Create a post. Any `id` on the input is stripped before sending.
    pub fn create_post<C: PostCandidate + ?Sized>(&self, input: &C) -> Result<Post, Error> {
        let post = validate_for_create(input).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected post for create");
        })?;
        Ok(self.transport.create(&post)?)
    }

    /// Replace post `id`. The input must carry every field, identity included.
    pub fn update_post<C: PostCandidate + ?Sized>(&self, id: i64, input: &C) -> Result<Post, Error> {
        let post = validate_for_update(input).inspect_err(|e| {
            tracing::warn!(id, error = %e, "rejected post for update");
        })?;
        Ok(self.transport.update(id, &post)?)
    }

    /// Delete post `id`. Existence is for the remote to decide.
    pub fn delete_post(&self, id: i64) -> Result<(), Error> {
        Ok(self.transport.delete(id)?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::error::{Operation, TransportCause, TransportError};
    use crate::types::{NewPost, PostInput};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        List,
        Create(NewPost),
        Update(i64, Post),
        Delete(i64),
    }

    /// Records every call and answers with canned responses.
    #[derive(Default)]
    struct RecordingTransport {
        calls: Mutex<Vec<Call>>,
        posts: Vec<Post>,
        response: Option<Post>,
        failure: Option<TransportError>,
    }

    impl RecordingTransport {
        fn responding_with(post: Post) -> Self {
            Self {
                response: Some(post),
                ..Self::default()
            }
        }

        fn failing_with(err: TransportError) -> Self {
            Self {
                failure: Some(err),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn answer<R>(&self, call: Call, ok: impl FnOnce() -> R) -> Result<R, TransportError> {
            self.calls.lock().unwrap().push(call);
            match &self.failure {
                Some(err) => Err(err.clone()),
                None => Ok(ok()),
            }
        }

        fn canned(&self) -> Post {
            self.response.clone().expect("no canned response configured")
        }
    }

    impl Transport for RecordingTransport {
        fn list(&self) -> Result<Vec<Post>, TransportError> {
            self.answer(Call::List, || self.posts.clone())
        }

        fn create(&self, post: &NewPost) -> Result<Post, TransportError> {
            self.answer(Call::Create(post.clone()), || self.canned())
        }

        fn update(&self, id: i64, post: &Post) -> Result<Post, TransportError> {
            self.answer(Call::Update(id, post.clone()), || self.canned())
        }

        fn delete(&self, id: i64) -> Result<(), TransportError> {
            self.answer(Call::Delete(id), || ())
        }
    }

    fn post(id: i64, title: &str, body: &str) -> Post {
        Post {
            user_id: 1,
            id,
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn list_posts_returns_transport_result_unchanged() {
        let posts = vec![post(1, "Foo", "Bar"), post(2, "Baz", "Qux")];
        let service = PostsService::new(RecordingTransport {
            posts: posts.clone(),
            ..RecordingTransport::default()
        });

        assert_eq!(service.list_posts().unwrap(), posts);
        assert_eq!(service.transport().calls(), vec![Call::List]);
    }

    #[test]
    fn create_post_sends_validated_input_once() {
        let created = post(1, "Foo", "Bar");
        let service = PostsService::new(RecordingTransport::responding_with(created.clone()));

        let response = service.create_post(&PostInput::new(1, "Foo", "Bar")).unwrap();

        assert_eq!(response, created);
        assert_eq!(
            service.transport().calls(),
            vec![Call::Create(NewPost {
                user_id: 1,
                title: "Foo".to_string(),
                body: "Bar".to_string(),
            })]
        );
    }

    #[test]
    fn create_post_strips_identity() {
        let service = PostsService::new(RecordingTransport::responding_with(post(101, "Foo", "Bar")));

        service.create_post(&PostInput::new(1, "Foo", "Bar").with_id(55)).unwrap();

        match &service.transport().calls()[..] {
            [Call::Create(sent)] => {
                let json = serde_json::to_value(sent).unwrap();
                assert!(json.get("id").is_none());
            }
            calls => panic!("unexpected calls: {calls:?}"),
        }
    }

    #[test]
    fn create_post_with_empty_title_never_reaches_transport() {
        let service = PostsService::new(RecordingTransport::default());

        let err = service
            .create_post(&PostInput::new(1, "", "x").with_id(2))
            .unwrap_err();

        match err {
            Error::Validation(e) => assert!(e.has_violation("title")),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(service.transport().calls().is_empty());
    }

    #[test]
    fn create_post_with_empty_body_never_reaches_transport() {
        let service = PostsService::new(RecordingTransport::default());

        let err = service.create_post(&PostInput::new(1, "Foo", "")).unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert!(service.transport().calls().is_empty());
    }

    #[test]
    fn update_post_sends_id_and_validated_post() {
        let updated = post(1, "Foo", "Updated");
        let service = PostsService::new(RecordingTransport::responding_with(updated.clone()));

        let response = service
            .update_post(1, &PostInput::from(updated.clone()))
            .unwrap();

        assert_eq!(response, updated);
        assert_eq!(service.transport().calls(), vec![Call::Update(1, updated)]);
    }

    #[test]
    fn update_post_with_invalid_fields_never_reaches_transport() {
        let service = PostsService::new(RecordingTransport::default());

        let err = service
            .update_post(1, &PostInput::new(1, "", "This is an updated post").with_id(1))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let err = service
            .update_post(1, &PostInput::new(1, "Foo", "Bar"))
            .unwrap_err();
        match err {
            Error::Validation(e) => assert!(e.has_violation("id")),
            other => panic!("expected validation error, got {other:?}"),
        }

        assert!(service.transport().calls().is_empty());
    }

    #[test]
    fn delete_post_forwards_id_without_validation() {
        let service = PostsService::new(RecordingTransport::default());

        service.delete_post(1).unwrap();
        service.delete_post(-3).unwrap();

        assert_eq!(
            service.transport().calls(),
            vec![Call::Delete(1), Call::Delete(-3)]
        );
    }

    #[test]
    fn json_candidate_with_wrong_types_never_reaches_transport() {
        let service = PostsService::new(RecordingTransport::default());

        let err = service
            .create_post(&serde_json::json!({"userId": "1", "title": "Foo", "body": "Bar"}))
            .unwrap_err();
        match err {
            Error::Validation(e) => assert_eq!(e.violations[0].message, "userId must be an integer"),
            other => panic!("expected validation error, got {other:?}"),
        }

        let err = service
            .update_post(1, &serde_json::json!({"userId": 1, "id": 1, "title": 5, "body": "Bar"}))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        assert!(service.transport().calls().is_empty());
    }

    #[test]
    fn json_candidate_is_sent_once_validated() {
        let created = post(1, "Foo", "Bar");
        let service = PostsService::new(RecordingTransport::responding_with(created.clone()));

        let response = service
            .create_post(&serde_json::json!({"userId": 1, "title": "Foo", "body": "Bar"}))
            .unwrap();

        assert_eq!(response, created);
        assert_eq!(service.transport().calls().len(), 1);
    }

    fn status_failure(operation: Operation) -> TransportError {
        TransportError::new(
            operation,
            TransportCause::Status {
                status: 404,
                body: "{}".to_string(),
            },
        )
    }

    fn assert_transport_error(err: Error, expected: &TransportError) {
        match err {
            Error::Transport(e) => assert_eq!(&e, expected),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[test]
    fn list_errors_propagate_unchanged() {
        let failure = TransportError::new(
            Operation::List,
            TransportCause::Network("connection refused".to_string()),
        );
        let service = PostsService::new(RecordingTransport::failing_with(failure.clone()));

        assert_transport_error(service.list_posts().unwrap_err(), &failure);
        assert_eq!(service.transport().calls(), vec![Call::List]);
    }

    #[test]
    fn create_errors_propagate_unchanged() {
        let failure = TransportError::new(
            Operation::Create,
            TransportCause::Decode("expected value at line 1 column 1".to_string()),
        );
        let service = PostsService::new(RecordingTransport::failing_with(failure.clone()));

        let err = service.create_post(&PostInput::new(1, "Foo", "Bar")).unwrap_err();

        assert_transport_error(err, &failure);
        assert_eq!(service.transport().calls().len(), 1);
    }

    #[test]
    fn update_errors_propagate_unchanged() {
        let failure = status_failure(Operation::Update);
        let service = PostsService::new(RecordingTransport::failing_with(failure.clone()));

        let err = service
            .update_post(1, &PostInput::new(1, "Foo", "Bar").with_id(1))
            .unwrap_err();

        assert_transport_error(err, &failure);
        assert_eq!(service.transport().calls(), vec![Call::Update(1, post(1, "Foo", "Bar"))]);
    }

    #[test]
    fn delete_errors_propagate_unchanged() {
        let failure = status_failure(Operation::Delete);
        let service = PostsService::new(RecordingTransport::failing_with(failure.clone()));

        assert_transport_error(service.delete_post(9).unwrap_err(), &failure);
        assert_eq!(service.transport().calls(), vec![Call::Delete(9)]);
    }
}
