use factlens_network::RemoteClassifier;
use factlens_signals::{Classifier, MlLabel};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn classifier_answering(body: serde_json::Value) -> (MockServer, RemoteClassifier) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;
    let classifier = RemoteClassifier::new(format!("{}/predict", server.uri())).unwrap();
    (server, classifier)
}

#[tokio::test]
async fn labelled_response_is_used_verbatim() {
    let (_server, classifier) = classifier_answering(json!({
        "prediction": "FAKE",
        "confidence": 0.91,
        "probabilities": {"FAKE": 0.91, "REAL": 0.09}
    }))
    .await;

    let prediction = classifier.predict("some article text").await.unwrap();
    assert_eq!(prediction.label(), MlLabel::Fake);
    assert!((prediction.confidence() - 0.91).abs() < 1e-12);
}

#[tokio::test]
async fn logits_response_goes_through_softmax() {
    let (_server, classifier) = classifier_answering(json!({ "logits": [0.0, 0.0] })).await;

    let prediction = classifier.predict("some article text").await.unwrap();
    assert_eq!(prediction.label(), MlLabel::Fake);
    assert!((prediction.confidence() - 0.5).abs() < 1e-12);
}

#[tokio::test]
async fn probabilities_response_picks_the_larger_class() {
    let (_server, classifier) =
        classifier_answering(json!({ "probabilities": {"FAKE": 0.2, "REAL": 0.8} })).await;

    let prediction = classifier.predict("some article text").await.unwrap();
    assert_eq!(prediction.label(), MlLabel::Real);
    assert!((prediction.confidence() - 0.8).abs() < 1e-12);
}

#[tokio::test]
async fn request_body_carries_the_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(body_json(json!({ "text": "the moon is made of cheese" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"prediction": "REAL", "confidence": 0.6})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let classifier = RemoteClassifier::new(format!("{}/predict", server.uri())).unwrap();
    classifier.predict("the moon is made of cheese").await.unwrap();
}

#[tokio::test]
async fn requests_use_the_shared_client_settings() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("user-agent", concat!("factlens/", env!("CARGO_PKG_VERSION"))))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"prediction": "FAKE", "confidence": 0.7})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let classifier = RemoteClassifier::new(format!("{}/predict", server.uri())).unwrap();
    classifier.predict("some article text").await.unwrap();
}

#[tokio::test]
async fn server_error_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let classifier = RemoteClassifier::new(format!("{}/predict", server.uri())).unwrap();
    let error = classifier.predict("some article text").await.unwrap_err();
    assert!(error.to_string().contains("503"), "{error:#}");
}

#[tokio::test]
async fn out_of_range_confidence_is_rejected() {
    let (_server, classifier) =
        classifier_answering(json!({ "prediction": "REAL", "confidence": 1.7 })).await;

    assert!(classifier.predict("some article text").await.is_err());
}

#[tokio::test]
async fn unrecognised_body_is_rejected() {
    let (_server, classifier) = classifier_answering(json!({ "label": "maybe" })).await;

    assert!(classifier.predict("some article text").await.is_err());
}
