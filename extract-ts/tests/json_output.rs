mod common;

use common::*;
use extract_ts::extract;
use extract_ts::ExtractOptions;
use serde_json::json;
use serde_json::to_string_pretty;
use serde_json::Value;
use similar::ChangeTag;
use similar::TextDiff;

fn assert_json_eq(expected: &Value, actual: &Value) {
  if expected == actual {
    return;
  }
  let expected_fmt = to_string_pretty(expected).unwrap();
  let actual_fmt = to_string_pretty(actual).unwrap();
  let mut msg = String::from("JSON output differs:\n");
  let diff = TextDiff::from_lines(&expected_fmt, &actual_fmt);
  for change in diff.iter_all_changes() {
    let sign = match change.tag() {
      ChangeTag::Delete => "-",
      ChangeTag::Insert => "+",
      ChangeTag::Equal => " ",
    };
    msg.push_str(sign);
    msg.push_str(&change.to_string());
  }
  panic!("{}", msg);
}

#[test]
fn reexported_classes_serialize_with_cross_references() {
  let program = reexports();
  let docs = extract(&program, &["privateModule.ts", "publicModule.ts"], &ExtractOptions::default()).unwrap();
  let actual: Value = serde_json::from_str(&docs.to_json(false).unwrap()).unwrap();

  let class = |name: &str, module: u32, module_id: &str, original: Value, is_abstract: bool| {
    json!({
      "docType": "class",
      "name": name,
      "module": module,
      "moduleId": module_id,
      "originalModule": original,
      "content": null,
      "location": null,
      "typeParameters": [],
      "heritage": [],
      "isAbstract": is_abstract,
      "constructor": null,
      "members": [],
      "statics": []
    })
  };
  let expected = json!([
    {
      "docType": "module",
      "id": "privateModule",
      "name": "privateModule",
      "fileName": "privateModule.ts",
      "exports": [1]
    },
    class("PrivateClass", 0, "privateModule", Value::Null, false),
    {
      "docType": "module",
      "id": "publicModule",
      "name": "publicModule",
      "fileName": "publicModule.ts",
      "exports": [3, 4]
    },
    class("PublicClass", 2, "publicModule", json!("privateModule"), false),
    class("AbstractClass", 2, "publicModule", Value::Null, true)
  ]);
  assert_json_eq(&expected, &actual);
}

#[test]
fn interface_members_serialize_inline_signatures() {
  let program = interfaces(false);
  let docs = extract(&program, &["interfaces.ts"], &ExtractOptions::default()).unwrap();
  let actual: Value = serde_json::from_str(&docs.to_json(true).unwrap()).unwrap();

  assert_json_eq(
    &json!({
      "docType": "member",
      "name": "call",
      "owner": 1,
      "memberKind": "call-signature",
      "access": "public",
      "isStatic": false,
      "optional": false,
      "returnType": "U",
      "parameters": [
        { "name": "param", "type": "T", "optional": false, "defaultValue": null }
      ],
      "typeParameters": ["T", "U extends Findable<T>"],
      "content": null,
      "location": null
    }),
    &actual[1]["callMember"],
  );
  assert_json_eq(&json!("member"), &actual[2]["docType"]);
  assert_json_eq(&json!("property"), &actual[2]["memberKind"]);
  assert_json_eq(&Value::Null, &actual[2]["parameters"]);
}
