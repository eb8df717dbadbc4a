use log::*;

use crate::deal_types::{Deal, Platform};

pub fn prepare_test_env() {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    debug!("🚀️ Logging initialised");
}

/// A small catalogue that covers every platform, with a mix of discounted and full-price deals.
pub fn sample_deals() -> Vec<Deal> {
    vec![
        Deal::new("flipkart_1", Platform::Flipkart, "₹1,299".into())
            .with_title("Wireless Headphones")
            .with_original_price("₹2,999".into())
            .with_discount(56.69)
            .with_url("https://www.flipkart.com/wireless-headphones/p/itm0123456789?pid=ACC123"),
        Deal::new("amazon_1", Platform::Amazon, "₹499".into())
            .with_title("Electric Kettle")
            .with_original_price("₹999".into())
            .with_discount(50.05)
            .with_url("https://www.amazon.in/Electric-Kettle/dp/B0ABC12345/ref=sr_1_1"),
        Deal::new("jiomart_1", Platform::Jiomart, "₹89".into())
            .with_title("Basmati Rice 1kg")
            .with_url("https://www.jiomart.com/p/groceries/basmati-rice/590001"),
        Deal::new("myntra_1", Platform::Myntra, "₹799".into())
            .with_title("Cotton T-Shirt <Slim Fit>")
            .with_original_price("₹1,599".into())
            .with_discount(50.03)
            .with_url("https://www.myntra.com/tshirts/brand/cotton-tshirt/123456/buy"),
        Deal::new("swiggy_1", Platform::Swiggy, "₹149".into())
            .with_title("Paneer Tikka Combo")
            .with_original_price("₹199".into())
            .with_discount(25.13)
            .with_url("https://www.swiggy.com/restaurants/tikka-house-4242"),
        Deal::new("bigbasket_1", Platform::Bigbasket, "₹240".into())
            .with_title("Cold Pressed Oil 1L")
            .with_original_price("₹240".into())
            .with_url("https://www.bigbasket.com/pd/40012345/cold-pressed-oil-1-l/"),
    ]
}

/// [`sample_deals`] in the JSON catalogue format read by [`crate::sources::JsonFileDealSource`].
pub fn sample_catalogue() -> String {
    let mut catalogue = serde_json::Map::new();
    for platform in Platform::ALL {
        let deals = sample_deals()
            .into_iter()
            .filter(|d| d.platform == platform)
            .map(|d| {
                let mut value = serde_json::to_value(&d).unwrap_or_default();
                if let (Some(obj), Some(url)) = (value.as_object_mut(), d.url) {
                    obj.insert("url".into(), url.into());
                }
                value
            })
            .collect::<Vec<_>>();
        catalogue.insert(platform.as_str().into(), deals.into());
    }
    serde_json::Value::Object(catalogue).to_string()
}
