//! Integration tests for the slog module.
//!
//! These tests verify that:
//! - `into_masked_json()` produces correctly masked JSON values
//! - The `slog::Value` implementation works with slog's serialization API
//! - Nested structures are properly masked when logged

#![cfg(feature = "slog")]

use std::{cell::RefCell, collections::HashMap, fmt::Arguments};

use remold::{
    slog::IntoMaskedJson, BankCard, CategoryRule, Email, Mask, MaskCategory, MaskRule, Mobile,
    Money, Name,
};
use serde::Serialize;
use serde_json::Value as JsonValue;

// A test serializer that captures serialized key-value pairs
struct CapturingSerializer {
    captured: RefCell<HashMap<String, CapturedValue>>,
}

#[derive(Debug, Clone, PartialEq)]
enum CapturedValue {
    Str(String),
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    Unit,
    None,
    // For nested serde values, we capture the JSON representation
    Serde(JsonValue),
}

impl CapturingSerializer {
    fn new() -> Self {
        Self {
            captured: RefCell::new(HashMap::new()),
        }
    }

    fn get(&self, key: &str) -> Option<CapturedValue> {
        self.captured.borrow().get(key).cloned()
    }
}

impl slog::Serializer for CapturingSerializer {
    fn emit_arguments(&mut self, key: slog::Key, val: &Arguments<'_>) -> slog::Result {
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::Str(val.to_string()));
        Ok(())
    }

    fn emit_str(&mut self, key: slog::Key, val: &str) -> slog::Result {
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::Str(val.into()));
        Ok(())
    }

    fn emit_bool(&mut self, key: slog::Key, val: bool) -> slog::Result {
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::Bool(val));
        Ok(())
    }

    fn emit_i64(&mut self, key: slog::Key, val: i64) -> slog::Result {
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::I64(val));
        Ok(())
    }

    fn emit_u64(&mut self, key: slog::Key, val: u64) -> slog::Result {
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::U64(val));
        Ok(())
    }

    fn emit_f64(&mut self, key: slog::Key, val: f64) -> slog::Result {
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::F64(val));
        Ok(())
    }

    fn emit_unit(&mut self, key: slog::Key) -> slog::Result {
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::Unit);
        Ok(())
    }

    fn emit_none(&mut self, key: slog::Key) -> slog::Result {
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::None);
        Ok(())
    }

    fn emit_serde(&mut self, key: slog::Key, val: &dyn slog::SerdeValue) -> slog::Result {
        // Serialize the value to JSON to capture it
        let json = serde_json::to_value(val.as_serde()).unwrap_or(JsonValue::Null);
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::Serde(json));
        Ok(())
    }
}

/// Helper function to serialize a slog::Value into any Serializer.
fn serialize_to_capture<V: slog::Value, S: slog::Serializer>(
    value: &V,
    key: &'static str,
    serializer: &mut S,
) {
    // The record is created and used in a single expression to avoid lifetime issues
    static RS: slog::RecordStatic<'static> = slog::record_static!(slog::Level::Info, "");
    // We need to ensure format_args! result lives long enough
    let args = format_args!("");
    let record = slog::Record::new(&RS, &args, slog::b!());
    value.serialize(&record, key, serializer).unwrap();
}

// ============================================================================
// Basic functionality tests
// ============================================================================

#[test]
fn test_into_masked_json_simple_struct() {
    #[derive(Clone, Mask, Serialize)]
    struct Customer {
        username: String,
        #[mask(Mobile)]
        mobile: String,
    }

    let customer = Customer {
        username: "alice".into(),
        mobile: "13800138000".into(),
    };

    let masked = customer.into_masked_json();

    // Serialize through slog's Value trait
    let mut serializer = CapturingSerializer::new();
    serialize_to_capture(&masked, "customer", &mut serializer);

    // Verify the captured value contains the masked mobile
    if let Some(CapturedValue::Serde(json)) = serializer.get("customer") {
        assert_eq!(json["username"], "alice");
        assert_eq!(json["mobile"], "138****8000");
    } else {
        panic!("Expected Serde value for 'customer' key");
    }
}

#[test]
fn test_into_masked_json_all_categories() {
    #[derive(Clone, Mask, Serialize)]
    struct Profile {
        #[mask(Name)]
        name: String,
        #[mask(Email)]
        email: String,
        #[mask(BankCard)]
        card: String,
        #[mask(Money)]
        balance: String,
    }

    let profile = Profile {
        name: "张三".into(),
        email: "zhangsan@example.com".into(),
        card: "6222807728905421317".into(),
        balance: "1234567890".into(),
    };

    let masked = profile.into_masked_json();

    let mut serializer = CapturingSerializer::new();
    serialize_to_capture(&masked, "profile", &mut serializer);

    if let Some(CapturedValue::Serde(json)) = serializer.get("profile") {
        assert_eq!(json["name"], "张*");
        assert_eq!(json["email"], "zh******************");
        assert_eq!(json["card"], "***************1317");
        assert_eq!(json["balance"], "******");
    } else {
        panic!("Expected Serde value for 'profile' key");
    }
}

#[test]
fn test_into_masked_json_nested_struct() {
    #[derive(Clone, Mask, Serialize)]
    struct Address {
        #[mask(remold::Address)]
        street: String,
        city: String,
    }

    #[derive(Clone, Mask, Serialize)]
    struct Person {
        name: String,
        #[mask(remold::IdNumber)]
        id_number: String,
        #[mask]
        address: Address,
    }

    let person = Person {
        name: "Bob".into(),
        id_number: "110112200801010739".into(),
        address: Address {
            street: "北京市朝阳区建国路001号".into(),
            city: "北京".into(),
        },
    };

    let masked = person.into_masked_json();

    let mut serializer = CapturingSerializer::new();
    serialize_to_capture(&masked, "person", &mut serializer);

    if let Some(CapturedValue::Serde(json)) = serializer.get("person") {
        // Name should be unchanged (untagged)
        assert_eq!(json["name"], "Bob");

        // Id number keeps first 6 and last 4
        assert_eq!(json["id_number"], "110112********0739");

        // Address street keeps first 6
        let street = json["address"]["street"].as_str().unwrap();
        assert_eq!(street, "北京市朝阳区*******");

        // City should be unchanged (untagged)
        assert_eq!(json["address"]["city"], "北京");
    } else {
        panic!("Expected Serde value for 'person' key");
    }
}

#[test]
fn test_into_masked_json_with_vec() {
    #[derive(Clone, Mask, Serialize)]
    struct CardList {
        #[mask(BankCard)]
        cards: Vec<String>,
    }

    let list = CardList {
        cards: vec![
            "6222807728905421317".into(),
            "6222800000000001234".into(),
        ],
    };

    let masked = list.into_masked_json();

    let mut serializer = CapturingSerializer::new();
    serialize_to_capture(&masked, "list", &mut serializer);

    if let Some(CapturedValue::Serde(json)) = serializer.get("list") {
        let cards = json["cards"].as_array().unwrap();
        assert_eq!(cards.len(), 2);

        // BankCard keeps last 4
        assert_eq!(cards[0].as_str().unwrap(), "***************1317");
        assert_eq!(cards[1].as_str().unwrap(), "***************1234");
    } else {
        panic!("Expected Serde value for 'list' key");
    }
}

#[test]
fn test_into_masked_json_with_option() {
    #[derive(Clone, Mask, Serialize)]
    struct OptionalMobile {
        #[mask(Mobile)]
        mobile: Option<String>,
        public: String,
    }

    // Test with Some value
    let with_mobile = OptionalMobile {
        mobile: Some("13800138000".into()),
        public: "visible".into(),
    };

    let masked = with_mobile.into_masked_json();
    let mut serializer = CapturingSerializer::new();
    serialize_to_capture(&masked, "data", &mut serializer);

    if let Some(CapturedValue::Serde(json)) = serializer.get("data") {
        assert_eq!(json["mobile"], "138****8000");
        assert_eq!(json["public"], "visible");
    } else {
        panic!("Expected Serde value");
    }

    // Test with None value
    let without_mobile = OptionalMobile {
        mobile: None,
        public: "visible".into(),
    };

    let masked = without_mobile.into_masked_json();
    let mut serializer = CapturingSerializer::new();
    serialize_to_capture(&masked, "data", &mut serializer);

    if let Some(CapturedValue::Serde(json)) = serializer.get("data") {
        assert!(json["mobile"].is_null());
        assert_eq!(json["public"], "visible");
    } else {
        panic!("Expected Serde value");
    }
}

// ============================================================================
// Enum tests
// ============================================================================

#[test]
fn test_into_masked_json_enum() {
    #[derive(Clone, Mask, Serialize)]
    enum Contact {
        Phone {
            #[mask(Mobile)]
            number: String,
        },
        Mail {
            name: String,
            #[mask(Email)]
            email: String,
        },
    }

    // Test Phone variant
    let phone = Contact::Phone {
        number: "13800138000".into(),
    };

    let masked = phone.into_masked_json();
    let mut serializer = CapturingSerializer::new();
    serialize_to_capture(&masked, "contact", &mut serializer);

    if let Some(CapturedValue::Serde(json)) = serializer.get("contact") {
        let number = json["Phone"]["number"].as_str().unwrap();
        assert_eq!(number, "138****8000");
    } else {
        panic!("Expected Serde value");
    }

    // Test Mail variant
    let mail = Contact::Mail {
        name: "admin".into(),
        email: "zhangsan@example.com".into(),
    };

    let masked = mail.into_masked_json();
    let mut serializer = CapturingSerializer::new();
    serialize_to_capture(&masked, "contact", &mut serializer);

    if let Some(CapturedValue::Serde(json)) = serializer.get("contact") {
        assert_eq!(json["Mail"]["name"], "admin");
        assert_eq!(json["Mail"]["email"], "zh******************");
    } else {
        panic!("Expected Serde value");
    }
}

// ============================================================================
// Edge cases
// ============================================================================

#[test]
fn test_into_masked_json_empty_string() {
    #[derive(Clone, Mask, Serialize)]
    struct Data {
        #[mask(Money)]
        value: String,
    }

    let data = Data { value: "".into() };

    let masked = data.into_masked_json();
    let mut serializer = CapturingSerializer::new();
    serialize_to_capture(&masked, "data", &mut serializer);

    if let Some(CapturedValue::Serde(json)) = serializer.get("data") {
        // Empty string with a full rule still becomes the placeholder
        assert_eq!(json["value"], "******");
    } else {
        panic!("Expected Serde value");
    }
}

#[test]
fn test_into_masked_json_unicode() {
    #[derive(Clone, Mask, Serialize)]
    struct Greeting {
        #[mask(custom(suffix = 4))]
        message: String,
    }

    let greeting = Greeting {
        message: "こんにちは世界".into(), // "Hello World" in Japanese (7 chars)
    };

    let masked = greeting.into_masked_json();
    let mut serializer = CapturingSerializer::new();
    serialize_to_capture(&masked, "greeting", &mut serializer);

    if let Some(CapturedValue::Serde(json)) = serializer.get("greeting") {
        let message = json["message"].as_str().unwrap();
        // The original has 7 characters, so last 4 should be visible
        assert_eq!(message, "***ちは世界");
    } else {
        panic!("Expected Serde value");
    }
}

#[test]
fn test_into_masked_json_no_tagged_fields() {
    #[derive(Clone, Mask, Serialize)]
    struct PublicData {
        name: String,
        count: i32,
    }

    let data = PublicData {
        name: "test".into(),
        count: 42,
    };

    let masked = data.into_masked_json();
    let mut serializer = CapturingSerializer::new();
    serialize_to_capture(&masked, "data", &mut serializer);

    if let Some(CapturedValue::Serde(json)) = serializer.get("data") {
        // No tagged fields, so everything should be unchanged
        assert_eq!(json["name"], "test");
        assert_eq!(json["count"], 42);
    } else {
        panic!("Expected Serde value");
    }
}

// ============================================================================
// Custom category tests
// ============================================================================

#[test]
fn test_into_masked_json_custom_category() {
    // Define a custom category that shows only last 4 digits with X masking
    #[derive(Clone, Copy)]
    struct CustomCreditCard;

    impl MaskCategory for CustomCreditCard {}

    impl CategoryRule for CustomCreditCard {
        fn rule() -> MaskRule {
            // Show last 4 digits only, mask rest with X
            MaskRule::keep_last(4).with_mask_char('X')
        }
    }

    #[derive(Clone, Mask, Serialize)]
    struct Payment {
        #[mask(CustomCreditCard)]
        card_number: String,
        amount: f64,
    }

    let payment = Payment {
        card_number: "4111111111111111".into(),
        amount: 99.99,
    };

    let masked = payment.into_masked_json();
    let mut serializer = CapturingSerializer::new();
    serialize_to_capture(&masked, "payment", &mut serializer);

    if let Some(CapturedValue::Serde(json)) = serializer.get("payment") {
        let card = json["card_number"].as_str().unwrap();
        // Should show only last 4 digits
        assert_eq!(card, "XXXXXXXXXXXX1111");
        assert_eq!(json["amount"], 99.99);
    } else {
        panic!("Expected Serde value");
    }
}

// ============================================================================
// Verify masking happens before serialization (not after)
// ============================================================================

#[test]
fn test_masking_happens_before_serialization() {
    // This test verifies that the original unmasked data never reaches slog
    use std::sync::atomic::{AtomicBool, Ordering};

    static SAW_VALUE: AtomicBool = AtomicBool::new(false);

    #[derive(Clone, Mask, Serialize)]
    struct Canary {
        #[mask(Money)]
        balance: String,
    }

    // Create a custom serializer that checks for the raw value
    struct LeakDetector;

    impl slog::Serializer for LeakDetector {
        fn emit_arguments(&mut self, _key: slog::Key, val: &Arguments<'_>) -> slog::Result {
            if val.to_string().contains("98765.43") {
                SAW_VALUE.store(true, Ordering::SeqCst);
            }
            Ok(())
        }

        fn emit_str(&mut self, _key: slog::Key, val: &str) -> slog::Result {
            if val.contains("98765.43") {
                SAW_VALUE.store(true, Ordering::SeqCst);
            }
            Ok(())
        }

        fn emit_serde(&mut self, _key: slog::Key, val: &dyn slog::SerdeValue) -> slog::Result {
            let json = serde_json::to_string(val.as_serde()).unwrap_or_default();
            if json.contains("98765.43") {
                SAW_VALUE.store(true, Ordering::SeqCst);
            }
            Ok(())
        }
    }

    let canary = Canary {
        balance: "98765.43".into(),
    };

    let masked = canary.into_masked_json();
    let mut detector = LeakDetector;
    serialize_to_capture(&masked, "canary", &mut detector);

    // The raw balance should never have been seen by the serializer
    assert!(
        !SAW_VALUE.load(Ordering::SeqCst),
        "Unmasked value leaked to slog serializer!"
    );
}
