use actix_web::{
    http::{header::ContentType, StatusCode},
    test,
    test::TestRequest,
    web::ServiceConfig,
    App,
};
use deal_engine::deal_types::{Deal, Platform};
use log::debug;

pub async fn get_request(path: &str, configure: fn(&mut ServiceConfig)) -> (StatusCode, String) {
    send(TestRequest::get().uri(path), configure).await
}

pub async fn post_request(path: &str, body: &str, configure: fn(&mut ServiceConfig)) -> (StatusCode, String) {
    let req = TestRequest::post().uri(path).insert_header(ContentType::json()).set_payload(body.to_string());
    send(req, configure).await
}

async fn send(req: TestRequest, configure: fn(&mut ServiceConfig)) -> (StatusCode, String) {
    let req = req.to_request();
    let app = App::new().configure(configure);
    let service = test::init_service(app).await;
    debug!("Making request");
    let res = test::call_service(&service, req).await;
    let status = res.status();
    let body = test::read_body(res).await;
    (status, String::from_utf8_lossy(&body).into_owned())
}

pub fn catalogue_for(platform: Platform) -> Vec<Deal> {
    match platform {
        Platform::Amazon => vec![
            Deal::new("amazon_1", Platform::Amazon, "₹499".into())
                .with_title("Electric Kettle")
                .with_original_price("₹999".into())
                .with_discount(50.05)
                .with_url("https://www.amazon.in/Electric-Kettle/dp/B0ABC12345/ref=sr_1_1"),
            Deal::new("amazon_2", Platform::Amazon, "₹99".into()).with_title("Mug"),
        ],
        Platform::Flipkart => vec![Deal::new("flipkart_1", Platform::Flipkart, "₹1,299".into())
            .with_title("Wireless Headphones")
            .with_original_price("₹2,999".into())
            .with_discount(56.69)
            .with_url("https://www.flipkart.com/wireless-headphones/p/itm0123456789?pid=ACC123")],
        _ => vec![],
    }
}
