//! Common source code fixtures for tests.

pub const STATIC_ASYNC_METHOD: &str = "class Foo { static async bar() {} }";

pub const UNRESOLVED_REFERENCE: &str = r#"
let before = 1;
let broken = missing + before;
let after = broken;
"#;

/// A mix of every declaration form, with references to each.
pub const MIXED_DECLARATIONS: &str = r#"
namespace Shapes {
    export interface Shape {
        area(): number;
        readonly name: string;
    }

    export enum Kind { Circle, Square = 2 }

    export class Circle implements Shape {
        static count = 0;
        readonly name = "circle";
        constructor(private radius: number) {
            Circle.count = Circle.count + 1;
        }
        get diameter() { return this.radius * 2; }
        area(): number { return this.radius * this.radius; }
        static async load<T>(value: T) { return value; }
    }

    export type Pair = Shape & { other: Shape };
}

function describe(shape: Shapes.Shape, kind: Shapes.Kind) {
    var label = shape.name;
    return label;
}

const circle = new Shapes.Circle(1);
describe(circle, Shapes.Kind.Circle);
circle.area();
circle.diameter;
"#;

pub const CLASS_HIERARCHY: &str = r#"
class Animal {
    legs = 4;
    speak() {}
}
class Dog extends Animal {
    bark() { this.speak(); }
}
interface Named { name: string; }
interface Pet extends Named { owner: string; }
let dog = new Dog();
dog.legs;
dog.bark();
let pet: Pet;
pet.name;
pet.owner;
"#;
