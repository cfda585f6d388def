#![allow(dead_code)]

//! Programs mirroring small TypeScript inputs, built the way a checker would
//! bind them.

use extract_ts::memory::MemoryProgram;
use extract_ts::program::DeclId;
use extract_ts::program::DeclKind;
use extract_ts::program::Declaration;
use extract_ts::program::FileId;
use extract_ts::program::ModifierFlags;
use extract_ts::program::SymbolId;
use extract_ts::program::VarKeyword;
use extract_ts::Doc;
use extract_ts::DocSet;

pub trait DeclExt {
  fn ty(self, ty: &str) -> Self;
  fn modifiers(self, modifiers: ModifierFlags) -> Self;
  fn init(self, init: &str) -> Self;
  fn optional(self) -> Self;
  fn type_params(self, params: &[&str]) -> Self;
  fn returns_value(self) -> Self;
  fn keyword(self, keyword: VarKeyword) -> Self;
}

impl DeclExt for Declaration {
  fn ty(mut self, ty: &str) -> Self {
    self.type_annotation = Some(ty.to_string());
    self
  }

  fn modifiers(mut self, modifiers: ModifierFlags) -> Self {
    self.modifiers |= modifiers;
    self
  }

  fn init(mut self, init: &str) -> Self {
    self.initializer = Some(init.to_string());
    self
  }

  fn optional(mut self) -> Self {
    self.question = true;
    self
  }

  fn type_params(mut self, params: &[&str]) -> Self {
    self.type_parameters = params.iter().map(|p| p.to_string()).collect();
    self
  }

  fn returns_value(mut self) -> Self {
    self.returns_value = true;
    self
  }

  fn keyword(mut self, keyword: VarKeyword) -> Self {
    self.var_keyword = Some(keyword);
    self
  }
}

pub fn decl(kind: DeclKind, file: FileId, name: &str) -> Declaration {
  Declaration::new(kind, file, name)
}

/// Declares and exports `decl` from `module`.
pub fn export(program: &mut MemoryProgram, module: SymbolId, decl: Declaration) -> (SymbolId, DeclId) {
  let (symbol, id) = program.declare(Some(module), decl);
  program.add_export(module, symbol);
  (symbol, id)
}

pub fn names<'a>(docs: impl IntoIterator<Item = &'a Doc>) -> Vec<&'a str> {
  docs.into_iter().map(Doc::name).collect()
}

pub fn member_names(docs: &DocSet, ids: &[extract_ts::DocId]) -> Vec<String> {
  docs.resolve_members(ids).map(|m| m.name.clone()).collect()
}

/// ```ts
/// export class FullMemberExample {
///   publicString: string;
///   protected protectedNumber: number;
///   private privateBoolean: boolean;
///   constructor(public constructorPublicString: string) {}
///   publicMethod(): string { return 'hello'; }
///   protected protectedMethod(): void {}
///   private privateMethod(): void {}
/// }
/// ```
pub fn full_member_example() -> MemoryProgram {
  let mut program = MemoryProgram::new();
  let (file, module) = program.add_module_file("fullMemberExample.ts");
  let (_, class) = export(&mut program, module, decl(DeclKind::Class, file, "FullMemberExample"));

  program.add_member(class, decl(DeclKind::Property, file, "publicString").ty("string"));
  program.add_member(
    class,
    decl(DeclKind::Property, file, "protectedNumber")
      .ty("number")
      .modifiers(ModifierFlags::PROTECTED),
  );
  program.add_member(
    class,
    decl(DeclKind::Property, file, "privateBoolean")
      .ty("boolean")
      .modifiers(ModifierFlags::PRIVATE),
  );
  let ctor = program.add_member(class, decl(DeclKind::Constructor, file, "constructor"));
  program.add_parameter(
    ctor,
    decl(DeclKind::Parameter, file, "constructorPublicString")
      .ty("string")
      .modifiers(ModifierFlags::PUBLIC),
  );
  program.add_member(
    class,
    decl(DeclKind::Method, file, "publicMethod")
      .ty("string")
      .returns_value(),
  );
  program.add_member(
    class,
    decl(DeclKind::Method, file, "protectedMethod")
      .ty("void")
      .modifiers(ModifierFlags::PROTECTED),
  );
  program.add_member(
    class,
    decl(DeclKind::Method, file, "privateMethod")
      .ty("void")
      .modifiers(ModifierFlags::PRIVATE),
  );
  program
}

/// ```ts
/// export enum SimpleEnum { FIRST, SECOND }
/// export class TypesClass {
///   simpleType: string;
///   inferredBool = true;
///   inferredEnum = SimpleEnum.FIRST;
///   methodReturnsBool(): boolean { return false; }
///   methodInferredString() { return "string"; }
///   methodInferredEnum() { return SimpleEnum.SECOND; }
///   methodInferredVoid() {}
///   methodInlineType(): { x:string; y:number } { return { x: 'x', y: 0 }; }
/// }
/// ```
pub fn determine_types() -> MemoryProgram {
  let mut program = MemoryProgram::new();
  let (file, module) = program.add_module_file("determineTypes.ts");

  let (_, simple_enum) = export(&mut program, module, decl(DeclKind::Enum, file, "SimpleEnum"));
  program.add_member(simple_enum, decl(DeclKind::EnumMember, file, "FIRST"));
  program.add_member(simple_enum, decl(DeclKind::EnumMember, file, "SECOND"));

  let (_, class) = export(&mut program, module, decl(DeclKind::Class, file, "TypesClass"));
  program.add_member(class, decl(DeclKind::Property, file, "simpleType").ty("string"));
  let inferred_bool = program.add_member(class, decl(DeclKind::Property, file, "inferredBool").init("true"));
  program.set_inferred_type(inferred_bool, "boolean");
  let inferred_enum = program.add_member(
    class,
    decl(DeclKind::Property, file, "inferredEnum").init("SimpleEnum.FIRST"),
  );
  program.set_inferred_type(inferred_enum, "SimpleEnum");
  program.add_member(
    class,
    decl(DeclKind::Method, file, "methodReturnsBool")
      .ty("boolean")
      .returns_value(),
  );
  let inferred_string = program.add_member(
    class,
    decl(DeclKind::Method, file, "methodInferredString").returns_value(),
  );
  program.set_inferred_return_type(inferred_string, "string");
  let inferred_enum_method = program.add_member(
    class,
    decl(DeclKind::Method, file, "methodInferredEnum").returns_value(),
  );
  program.set_inferred_return_type(inferred_enum_method, "SimpleEnum");
  program.add_member(class, decl(DeclKind::Method, file, "methodInferredVoid"));
  program.add_member(
    class,
    decl(DeclKind::Method, file, "methodInlineType")
      .ty("{ x:string; y:number }")
      .returns_value(),
  );
  program
}

/// ```ts
/// export interface MyInterface {
///   optionalProperty?: string;
///   <T, U extends Findable<T>>(param: T): U;
///   new (param: number): MyInterface;
/// }
/// export interface Findable<T> {}
/// ```
///
/// With `construct_first`, the construct signature is declared before the
/// call signature.
pub fn interfaces(construct_first: bool) -> MemoryProgram {
  let mut program = MemoryProgram::new();
  let (file, module) = program.add_module_file("interfaces.ts");
  let (_, iface) = export(&mut program, module, decl(DeclKind::Interface, file, "MyInterface"));
  program.add_member(
    iface,
    decl(DeclKind::Property, file, "optionalProperty")
      .ty("string")
      .optional(),
  );

  let add_call = |program: &mut MemoryProgram| {
    let call = program.add_member(
      iface,
      decl(DeclKind::CallSignature, file, "__call")
        .ty("U")
        .type_params(&["T", "U extends Findable<T>"]),
    );
    program.add_parameter(call, decl(DeclKind::Parameter, file, "param").ty("T"));
  };
  let add_new = |program: &mut MemoryProgram| {
    let new = program.add_member(
      iface,
      decl(DeclKind::ConstructSignature, file, "__new").ty("MyInterface"),
    );
    program.add_parameter(new, decl(DeclKind::Parameter, file, "param").ty("number"));
  };
  if construct_first {
    add_new(&mut program);
    add_call(&mut program);
  } else {
    add_call(&mut program);
    add_new(&mut program);
  }

  export(
    &mut program,
    module,
    decl(DeclKind::Interface, file, "Findable").type_params(&["T"]),
  );
  program
}

/// ```ts
/// export var __esModule = true;
/// export class OKToExport {}
/// export function _thisIsPrivate() {}
/// export var thisIsOK = '!';
/// ```
pub fn ignore_exports_matching() -> MemoryProgram {
  let mut program = MemoryProgram::new();
  let (file, module) = program.add_module_file("ignoreExportsMatching.ts");
  let (_, marker) = export(
    &mut program,
    module,
    decl(DeclKind::Variable, file, "___esModule").keyword(VarKeyword::Var),
  );
  program.set_inferred_type(marker, "boolean");
  export(&mut program, module, decl(DeclKind::Class, file, "OKToExport"));
  export(&mut program, module, decl(DeclKind::Function, file, "_thisIsPrivate"));
  let (_, ok) = export(
    &mut program,
    module,
    decl(DeclKind::Variable, file, "thisIsOK").keyword(VarKeyword::Var),
  );
  program.set_inferred_type(ok, "string");
  program
}

/// ```ts
/// // privateModule.ts
/// export class PrivateClass {}
/// // publicModule.ts
/// export { PrivateClass as PublicClass } from './privateModule';
/// export abstract class AbstractClass {}
/// ```
pub fn reexports() -> MemoryProgram {
  let mut program = MemoryProgram::new();
  let (private_file, private_module) = program.add_module_file("privateModule.ts");
  let (private_class, _) = export(
    &mut program,
    private_module,
    decl(DeclKind::Class, private_file, "PrivateClass"),
  );

  let (public_file, public_module) = program.add_module_file("publicModule.ts");
  program.add_alias(public_module, public_file, "PublicClass", Some(private_class));
  export(
    &mut program,
    public_module,
    decl(DeclKind::Class, public_file, "AbstractClass").modifiers(ModifierFlags::ABSTRACT),
  );
  program
}

/// ```ts
/// export class OrderingOfMembers {
///   firstItem: string;
///   otherMethod(): void {}
///   static create(): OrderingOfMembers { ... }
///   constructor(private readonly service: Service, public name: string) {}
///   doStuff(): void {}
/// }
/// ```
pub fn ordering_of_members(with_constructor: bool) -> MemoryProgram {
  let mut program = MemoryProgram::new();
  let (file, module) = program.add_module_file("orderingOfMembers.ts");
  let (_, class) = export(&mut program, module, decl(DeclKind::Class, file, "OrderingOfMembers"));
  program.add_member(class, decl(DeclKind::Property, file, "firstItem").ty("string"));
  program.add_member(class, decl(DeclKind::Method, file, "otherMethod").ty("void"));
  if with_constructor {
    program.add_member(
      class,
      decl(DeclKind::Method, file, "create")
        .ty("OrderingOfMembers")
        .modifiers(ModifierFlags::STATIC)
        .returns_value(),
    );
    let ctor = program.add_member(class, decl(DeclKind::Constructor, file, "constructor"));
    program.add_parameter(
      ctor,
      decl(DeclKind::Parameter, file, "service")
        .ty("Service")
        .modifiers(ModifierFlags::PRIVATE | ModifierFlags::READONLY),
    );
    program.add_parameter(
      ctor,
      decl(DeclKind::Parameter, file, "name")
        .ty("string")
        .modifiers(ModifierFlags::PUBLIC),
    );
  }
  program.add_member(class, decl(DeclKind::Method, file, "doStuff").ty("void"));
  program
}

/// ```ts
/// export function getDirective(): angular.IDirective { ... }
/// export const scope = angular.element(document).scope();
/// ```
pub fn strip_namespaces() -> MemoryProgram {
  let mut program = MemoryProgram::new();
  let (file, module) = program.add_module_file("stripNamespaces.ts");
  export(
    &mut program,
    module,
    decl(DeclKind::Function, file, "getDirective")
      .ty("angular.IDirective")
      .returns_value(),
  );
  let (_, scope) = export(
    &mut program,
    module,
    decl(DeclKind::Variable, file, "scope")
      .keyword(VarKeyword::Const)
      .init("angular.element(document).scope()"),
  );
  program.set_inferred_type(scope, "angular.IScope");
  program
}

/// ```ts
/// // uniteNamespaces1.ts
/// namespace example.test { export class InnerClassOne {} }
/// // uniteNamespaces2.ts
/// namespace example { export namespace test { export class InnerClass {} } }
/// ```
///
/// The files are bound independently, so each has its own `example` and
/// `test` symbols.
pub fn unite_namespaces() -> MemoryProgram {
  let mut program = MemoryProgram::new();

  let file = program.add_file("uniteNamespaces1.ts");
  let (example, example_decl) = program.declare(None, decl(DeclKind::Namespace, file, "example"));
  let (test, _) = program.declare(Some(example), decl(DeclKind::Namespace, file, "test"));
  program.set_body(example_decl, test);
  program.add_export(example, test);
  export(&mut program, test, decl(DeclKind::Class, file, "InnerClassOne"));
  program.add_statement(file, example);

  let file = program.add_file("uniteNamespaces2.ts");
  let (example, _) = program.declare(None, decl(DeclKind::Namespace, file, "example"));
  let (test, _) = program.declare(Some(example), decl(DeclKind::Namespace, file, "test"));
  program.add_export(example, test);
  export(&mut program, test, decl(DeclKind::Class, file, "InnerClass"));
  program.add_statement(file, example);

  program
}

/// ```ts
/// export function test(a: string, b?: number, c = 3): number { ... }
/// export class TestClass {
///   method(a: string, b?: number, c = 3): number { ... }
/// }
/// ```
pub fn parse_signatures() -> MemoryProgram {
  let mut program = MemoryProgram::new();
  let (file, module) = program.add_module_file("parseSignatures.ts");

  let add_params = |program: &mut MemoryProgram, callable: DeclId| {
    program.add_parameter(callable, decl(DeclKind::Parameter, file, "a").ty("string"));
    program.add_parameter(
      callable,
      decl(DeclKind::Parameter, file, "b").ty("number").optional(),
    );
    let c = program.add_parameter(callable, decl(DeclKind::Parameter, file, "c").init("3"));
    program.set_inferred_type(c, "number");
  };

  let (_, function) = export(
    &mut program,
    module,
    decl(DeclKind::Function, file, "test").ty("number").returns_value(),
  );
  add_params(&mut program, function);

  let (_, class) = export(&mut program, module, decl(DeclKind::Class, file, "TestClass"));
  let method = program.add_member(
    class,
    decl(DeclKind::Method, file, "method").ty("number").returns_value(),
  );
  add_params(&mut program, method);
  program
}
